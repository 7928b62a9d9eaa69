#[macro_use]
mod common;

#[test]
fn and_returns_the_first_falsy_operand_or_the_last_operand() {
    assert_prints!(
        r#"
        print false and "ignored";
        print nil and "ignored";
        print 1 and 2;
        print false and 1 and 2;
        "#,
        "false\nnil\n2\n"
    );
}

#[test]
fn and_short_circuits_and_never_evaluates_its_right_operand() {
    assert_prints!(
        r#"
        fun bang() { print "evaluated"; return true; }
        false and bang();
        print "done";
        "#,
        "done\n"
    );
}

#[test]
fn or_returns_the_first_truthy_operand_or_the_last_operand() {
    assert_prints!(
        r#"
        print 1 or 2;
        print false or 1;
        print false or false or "last";
        "#,
        "1\n1\nlast\n"
    );
}

#[test]
fn or_short_circuits_and_never_evaluates_its_right_operand() {
    assert_prints!(
        r#"
        fun bang() { print "evaluated"; return false; }
        true or bang();
        print "done";
        "#,
        "done\n"
    );
}
