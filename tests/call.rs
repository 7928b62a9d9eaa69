#[macro_use]
mod common;

#[test]
fn calling_a_bool_is_a_runtime_error() {
    assert_runtime_error!("true();", "Can only call functions and classes");
}

#[test]
fn calling_nil_is_a_runtime_error() {
    assert_runtime_error!("nil();", "Can only call functions and classes");
}

#[test]
fn calling_a_number_is_a_runtime_error() {
    assert_runtime_error!("1();", "Can only call functions and classes");
}

#[test]
fn calling_a_string_is_a_runtime_error() {
    assert_runtime_error!("\"str\"();", "Can only call functions and classes");
}

#[test]
fn calling_an_instance_is_a_runtime_error() {
    assert_runtime_error!("class C {} var c = C(); c();", "Can only call functions and classes");
}

#[test]
fn wrong_arity_is_a_runtime_error() {
    assert_runtime_error!("fun f(a, b) { return a + b; } f(1);", "Expected 2 arguments but got 1");
}

#[test]
fn extra_arguments_is_a_runtime_error() {
    assert_runtime_error!("fun f() {} f(1);", "Expected 0 arguments but got 1");
}

#[test]
fn arguments_evaluate_left_to_right() {
    assert_prints!(
        r#"
        fun side(n) { print n; return n; }
        fun f(a, b) {}
        f(side(1), side(2));
        "#,
        "1\n2\n"
    );
}
