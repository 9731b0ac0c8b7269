use tern::{Assoc, Builtin, Engine, Env, Error, ErrorKind, Special, Step, Value};

fn eval(code: &str) -> Value {
    Engine::default()
        .execute(code)
        .unwrap_or_else(|err| panic!("failed to eval {:?}: {}", code, err))
}

fn eval_err(code: &str) -> ErrorKind {
    Engine::default()
        .execute(code)
        .expect_err("expected an error")
        .kind()
        .clone()
}

fn sym(s: &str) -> Value {
    Value::symbol(s)
}

#[test]
fn test_precedence() {
    assert_eq!(eval("1 + 2 * 3"), Value::Int(7));
    assert_eq!(eval("1 * 2 + 3"), Value::Int(5));
    assert_eq!(eval("(1 + 2) * 3"), Value::Int(9));
    // `-` is not in the table, so it binds tighter than `*`.
    assert_eq!(eval("5 - 2 * 3"), Value::Int(9));
}

#[test]
fn test_prefix_and_postfix() {
    assert_eq!(eval("- 5"), Value::Int(-5));
    assert_eq!(eval("5 +"), Value::Int(5));
    assert_eq!(eval("()"), Value::Nil);
}

#[test]
fn test_cons_is_right_associative() {
    assert_eq!(
        eval("1 : 2 : 3"),
        Value::cons(sym("1"), Value::cons(sym("2"), sym("3"))),
    );
}

#[test]
fn test_else_short_circuits() {
    assert_eq!(eval("() | 5"), sym("5"));
    assert_eq!(eval("3 | (1 (2 + 3) 4)"), sym("3"));
    assert!(matches!(eval_err("() | (1 (2 + 3) 4)"), ErrorKind::UnsupportedOperator(_)));
    assert_eq!(eval("{undefined} | fallback"), sym("fallback"));
}

#[test]
fn test_closures() {
    assert_eq!(eval(r"f = (x -> {x} + 1) \ 10 f ()"), Value::Int(11));
    assert_eq!(eval(r"f = (x -> {x} + 1) \ 10 f () \ {x}"), Value::Nil);
}

#[test]
fn test_lexical_scope() {
    let code = r"x = 1 \ f = (y -> {x}) \ g = (x -> () f ()) \ 5 g ()";
    assert_eq!(eval(code), sym("1"));
}

#[test]
fn test_two_parameter_function() {
    assert_eq!(eval(r"add = (a : b -> {a} * 10 + {b}) \ 3 add 4"), Value::Int(34));
    assert_eq!(eval(r"rhs = (() : b -> {b}) \ 3 rhs 4"), sym("4"));
}

#[test]
fn test_destructuring_assignment() {
    assert_eq!(eval(r"a : b = 1 : 2 \ {a} + {b}"), Value::Int(3));
    assert_eq!(eval(r"a : b = 7 \ {a} * {b}"), Value::Int(49));
    assert_eq!(eval("x = 4"), sym("4"));
    assert!(matches!(eval_err("(1 + 1) = 2"), ErrorKind::InvalidBinding(_)));
}

#[test]
fn test_evaluation_order() {
    assert_eq!(eval(r"(x = 1) + (x = 2) \ {x}"), sym("2"));
    assert_eq!(eval("(x = 1) + {x}"), Value::Int(2));
}

#[test]
fn test_quasiquote() {
    assert_eq!(
        eval("[| 1 + (| 2 + 3 |) |]"),
        Value::block(Value::tree(sym("1"), sym("+"), Value::Int(5))),
    );
    assert_eq!(
        eval(r"n = 4 \ [| x * (| {n} + 1 |) |]"),
        Value::block(Value::tree(sym("x"), sym("*"), Value::Int(5))),
    );
    assert_eq!(
        eval(r"q = [| a + b |] \ {q}"),
        Value::block(Value::tree(sym("a"), sym("+"), sym("b"))),
    );
    assert_eq!(eval("(| 1 + 2 |)"), Value::Int(3));
}

#[test]
fn test_arrays() {
    assert_eq!(eval("1 , 2 , 3"), Value::Array(vec![sym("1"), sym("2"), sym("3")]));
    assert_eq!(eval("[1 (2 + 3) x]"), Value::Array(vec![sym("1"), Value::Int(5), sym("x")]));
    assert_eq!(eval(r"xs = 1 , 2 \ {xs} , 3"), Value::Array(vec![sym("1"), sym("2"), sym("3")]));
    assert_eq!(eval(r"xs = 1 , 2 \ ys = {xs} , 3 \ {xs}"), Value::Array(vec![sym("1"), sym("2")]));
    assert_eq!(eval("[a] ~ [b]"), Value::Array(vec![sym("a"), sym("b")]));
}

#[test]
fn test_long_flat_chains() {
    let code = (1..=10_000).map(|i| i.to_string()).collect::<Vec<_>>().join(" , ");
    match eval(&code) {
        Value::Array(items) => {
            assert_eq!(items.len(), 10_000);
            assert_eq!(items[9_999], sym("10000"));
        },
        other => panic!("expected an array, got {:?}", other),
    }

    let code = vec!["1"; 10_000].join(" + ");
    assert_eq!(eval(&code), Value::Int(10_000));
}

#[test]
fn test_strings_and_comments() {
    assert_eq!(eval("\"ab\" ~ \"cd\""), Value::string("abcd"));
    assert_eq!(eval("\"tab\\there\""), Value::string("tab\there"));
    assert_eq!(eval("'line one\n'line two\n"), Value::string("line one\nline two"));
    assert_eq!(eval("1 + # ignored\n 2"), Value::Int(3));
}

#[test]
fn test_deep_tail_recursion() {
    let code = r"
        stop0 = (a -> done) \
        loop = (n -> (() (stop ~ {n}) ()) | ({n} - 1 loop ())) \
        10000 loop ()
    ";
    assert_eq!(eval(code), sym("done"));
}

#[test]
fn test_globals_and_isolation() {
    let engine = Engine::default().with_global("A", Value::Int(123));
    assert_eq!(engine.execute("{A} + 1"), Ok(Value::Int(124)));
    assert_eq!(engine.execute("z = 5"), Ok(sym("5")));
    assert_eq!(engine.execute("{z}"), Ok(Value::Nil));
}

#[test]
fn test_custom_operators() {
    fn max(lhs: Value, rhs: Value) -> Result<Value, Error> {
        Ok(Value::Int(lhs.to_int()?.max(rhs.to_int()?)))
    }

    let engine = Engine::default().with_builtin(Builtin { name: "max", func: max });
    assert_eq!(engine.execute("3 max 7 max 5"), Ok(Value::Int(7)));

    fn hold(_: Value, rhs: &Value, _: &Env) -> Result<Step, Error> {
        Ok(Step::Done(Value::block(rhs.clone())))
    }

    let engine = Engine::default().with_special(Special { name: "?", func: hold });
    assert_eq!(
        engine.execute("1 ? (2 + 3)"),
        Ok(Value::block(Value::tree(sym("2"), sym("+"), sym("3")))),
    );

    let code = r"dbl = (a : b -> ({a} + {b}) * 2) \ 1 + 2 dbl 3";
    assert_eq!(Engine::default().execute(code), Ok(Value::Int(11)));
    let loose = Engine::default().with_operator("dbl", 4, Assoc::Left);
    assert_eq!(loose.execute(code), Ok(Value::Int(12)));
}

#[test]
fn test_errors() {
    assert!(matches!(eval_err("(1 + 2]"), ErrorKind::BracketMismatch { .. }));
    assert!(matches!(eval_err("[| 1 ]"), ErrorKind::BracketMismatch { .. }));
    assert_eq!(eval_err("\"open"), ErrorKind::UnterminatedString);
    assert!(matches!(eval_err("x + 1"), ErrorKind::NotAnInteger(_)));
    assert!(matches!(eval_err("() ~ x"), ErrorKind::CannotCombine(..)));
    assert_eq!(eval_err("99999999999999999999 + 1"), ErrorKind::Overflow);
}

#[test]
fn test_error_context() {
    let code = "1 +\n(2 ]";
    let err = Engine::default().execute(code).unwrap_err();
    assert_eq!(err.in_context(code), "2:4: mismatched brackets: expected `)`, found `]`");
}
