#[macro_use]
mod common;

#[test]
fn get_set_and_read_back_a_field() {
    assert_prints!(
        r#"
        class Foo {}
        var foo = Foo();
        foo.bar = "bar value";
        foo.baz = "baz value";
        print foo.bar;
        print foo.baz;
        "#,
        "bar value\nbaz value\n"
    );
}

#[test]
fn reading_an_undefined_field_is_a_runtime_error() {
    assert_runtime_error!("class Foo {} print Foo().bar;", "Undefined property 'bar'");
}

#[test]
fn a_field_shadows_a_method_of_the_same_name() {
    assert_prints!(
        r#"
        class Foo {
            bar() { return "method"; }
        }
        var foo = Foo();
        print foo.bar();
        foo.bar = "field";
        print foo.bar;
        "#,
        "method\nfield\n"
    );
}

#[test]
fn get_on_a_non_instance_is_a_runtime_error() {
    assert_runtime_error!("true.foo;", "Only instances have properties");
    assert_runtime_error!("nil.foo;", "Only instances have properties");
    assert_runtime_error!("(1).foo;", "Only instances have properties");
}

#[test]
fn set_on_a_non_instance_is_a_runtime_error() {
    assert_runtime_error!("true.foo = 1;", "Only instances have properties");
}

#[test]
fn get_on_a_class_itself_is_a_runtime_error() {
    assert_runtime_error!("class Foo {} Foo.bar;", "Only instances have properties");
}

#[test]
fn calling_a_non_callable_field_is_a_runtime_error() {
    assert_runtime_error!(
        r#"
        class Foo {}
        var foo = Foo();
        foo.bar = "not a function";
        foo.bar();
        "#,
        "Can only call functions and classes"
    );
}

#[test]
fn calling_a_stored_function_field_works() {
    assert_prints!(
        r#"
        fun bar(a, b) { print a; print b; }
        class Foo {}
        var foo = Foo();
        foo.bar = bar;
        foo.bar(1, 2);
        "#,
        "1\n2\n"
    );
}
