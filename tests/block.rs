#[macro_use]
mod common;

#[test]
fn empty_block_is_a_no_op() {
    assert_prints!("{} print \"ok\";", "ok\n");
}

#[test]
fn block_scoped_declaration_shadows_then_restores() {
    assert_prints!(
        "var a = \"outer\"; { var a = \"inner\"; print a; } print a;",
        "inner\nouter\n"
    );
}

#[test]
fn nested_blocks_each_get_their_own_scope() {
    assert_prints!(
        "var a = 1; { var a = 2; { var a = 3; print a; } print a; } print a;",
        "3\n2\n1\n"
    );
}
