use indoc::indoc;
use init_check::{analyze, checker::InitializationChecker, ir::Name, parse, parse_module, Error};
use pretty_assertions::assert_eq;

#[test]
fn analyze_reports_nothing_for_initialized_variables() {
    let input = indoc! {"
        define @main {
        entry:
          %x = alloca
          store 0, %x
          %v = load %x
          ret %v
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "");
}

#[test]
fn analyze_reports_read_before_store() {
    let input = indoc! {"
        define @main {
          %x = alloca
          %v = load %x
          store %v, %x
          ret %v
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "x\n");
}

#[test]
fn analyze_sorts_names_within_a_procedure() {
    let input = indoc! {"
        define @main {
          %b = alloca
          %a = alloca
          %sum = add %b, %a
          ret %sum
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "a\nb\n");
}

#[test]
fn analyze_follows_storage_order_not_control_flow() {
    // `then` runs before `merge`, but is stored after it.
    let input = indoc! {"
        define @choose {
        entry:
          %r = alloca
          %c = icmp %0, 0
          br %c, label %then, label %merge
        merge:
          %v = load %r
          ret %v
        then:
          store 1, %r
          br label %merge
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "r\n");
}

#[test]
fn analyze_reports_first_block_allocation_read_in_second_block() {
    let input = indoc! {"
        define @f {
        b1:
          %y = alloca
        b2:
          %v = load %y
          store 1, %y
        }
    "};
    let module = parse(input).unwrap();
    assert_eq!(
        InitializationChecker::check(&module.procedures[0]),
        vec![Name::from("y")]
    );
}

#[test]
fn analyze_checks_each_procedure_independently() {
    let input = indoc! {"
        ; `x` is allocated in @first only.
        define @first {
          %x = alloca
          call @use, %x
        }

        define @second {
          call @use, %x
        }

        define @third {
          %z = alloca
          call @use, %z
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "x\nz\n");
}

#[test]
fn analyze_reports_reallocated_variable_once() {
    let input = indoc! {"
        define @main {
          %x = alloca
          %x = alloca
          %v = load %x
          %w = load %x
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "x\n");
}

#[test]
fn analyze_reports_variable_reallocated_after_store() {
    let input = indoc! {"
        define @main {
          %x = alloca
          store 1, %x
          %x = alloca
          %v = load %x
        }
    "};
    assert_eq!(analyze(input, "def-pass").unwrap(), "x\n");
}

#[test]
fn parse_module_accepts_back_to_back_results() {
    let input = indoc! {"
        define @main {
        entry:
          %a = alloca
          %b = alloca
          %v = load %a
          ret
          %r = add 1, 2
        }
    "};
    let module = parse_module(input).unwrap();
    let results: Vec<_> = module.procedures[0]
        .instructions()
        .map(|instruction| instruction.result().map(|name| name.to_string()))
        .collect();
    assert_eq!(
        results,
        vec![
            Some("a".to_string()),
            Some("b".to_string()),
            Some("v".to_string()),
            None,
            Some("r".to_string()),
        ]
    );
}

#[test]
fn fix_pass_reports_nothing() {
    let input = indoc! {"
        define @main {
          %x = alloca
          %v = load %x
        }
    "};
    assert_eq!(analyze(input, "fix-pass").unwrap(), "");
}

#[test]
fn unknown_pass_is_an_error() {
    let result = analyze("define @main { ret }", "mem2reg");
    assert!(matches!(result, Err(Error::UnknownPass { name }) if name == "mem2reg"));
}

#[test]
fn syntax_errors_are_reported() {
    let result = analyze("define @main { store 1 }", "def-pass");
    match result {
        Err(Error::Syntax(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].message, "`store` takes 2 operands, found 1");
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}
