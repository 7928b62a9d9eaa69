#[macro_use]
mod common;

#[test]
fn a_function_declared_inside_a_block_does_not_leak_into_the_enclosing_scope() {
    assert_runtime_error!(
        r#"
        {
            fun inner() {}
        }
        inner();
        "#,
        "Undefined variable 'inner'"
    );
}

#[test]
fn reassigning_a_captured_variable_from_inside_a_nested_function_is_visible_outside() {
    assert_prints!(
        r#"
        var x = "before";
        fun set() { x = "after"; }
        set();
        print x;
        "#,
        "after\n"
    );
}
