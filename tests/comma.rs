#[macro_use]
mod common;

#[test]
fn comma_evaluates_the_left_operand_and_yields_the_right() {
    assert_prints!("print (1, 2, 3);", "3\n");
}

#[test]
fn comma_still_evaluates_its_discarded_left_operand_for_side_effects() {
    assert_prints!(
        r#"
        var a = "unset";
        print (a = "set", a);
        "#,
        "set\n"
    );
}

#[test]
fn comma_at_statement_level_runs_every_operand_left_to_right() {
    assert_prints!(
        r#"
        fun mark(n) { print n; return n; }
        mark(1), mark(2), mark(3);
        "#,
        "1\n2\n3\n"
    );
}

#[test]
fn a_comma_inside_call_arguments_separates_arguments_rather_than_acting_as_the_comma_operator() {
    assert_prints!(
        r#"
        fun add(a, b, c) { return a + b + c; }
        print add(1, 2, 3);
        "#,
        "6\n"
    );
}

#[test]
fn a_comma_expression_can_still_be_passed_as_a_single_argument_when_parenthesized() {
    assert_prints!(
        r#"
        fun identity(x) { return x; }
        print identity((1, 2, 3));
        "#,
        "3\n"
    );
}
