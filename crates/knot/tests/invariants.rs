//! Universal invariants (spec.md §8, properties 1–6).

use knot::{CollectPrint, Environment, EvalContext, Node, Origin, ReleaseTemporary, evaluate, parse_program, release};

fn one_form(src: &str) -> Node {
    let program = parse_program(src).unwrap();
    let forms = program.list_children().unwrap();
    assert_eq!(forms.len(), 1);
    let form = forms.into_iter().next().unwrap();
    release(program);
    form
}

#[test]
fn exists_flips_from_false_to_true_after_set_with_a_deep_copy_of_the_value() {
    let program = parse_program("(SET 'XS '(1 2 3))").unwrap();
    let forms = program.list_children().unwrap();
    let mut env = Environment::new();
    let mut out = CollectPrint::new();

    assert!(!env.exists("XS"));
    {
        let mut ctx = EvalContext::new(&mut env, &mut out);
        let result = evaluate(&forms[0], &mut ctx, 0).unwrap();
        result.release_temporary();
    }
    assert!(env.exists("XS"));

    let value = env.lookup("XS").unwrap();
    assert_eq!(value.origin(), Origin::Variable);
    assert_eq!(value.to_string(), "(1 2 3)");
    // The stored value must be an independent copy, not an alias of the
    // quoted AST literal: mutating it must not touch the program tree.
    value.list_append(Node::number(4, Origin::Variable)).unwrap();
    let set_call = &forms[0];
    let quoted_literal_form = set_call.list_get(2).unwrap();
    let literal_list = quoted_literal_form.list_get(1).unwrap();
    assert_eq!(literal_list.list_len(), Some(3), "SET must deep-copy, not alias, its value");

    release(program);
}

#[test]
fn set_replacing_a_variables_value_releases_its_old_contents() {
    // Property 1 (spec.md §8): no node with origin Variable is released
    // unless the environment is torn down or a SET intentionally replaces
    // its contents — and when SET *does* replace them, the old contents
    // must actually be released, not leaked. Hold a second handle onto one
    // child of the old list so its refcount is directly observable across
    // the reassignment.
    let mut env = Environment::new();
    let mut out = CollectPrint::new();

    let setup = one_form("(SET 'XS '(1 2 3))");
    {
        let mut ctx = EvalContext::new(&mut env, &mut out);
        evaluate(&setup, &mut ctx, 0).unwrap().release_temporary();
    }

    let held_child = env.lookup("XS").unwrap().list_get(0).unwrap();
    assert_eq!(held_child.strong_count(), 2, "one handle in the variable's list, one held here");

    let reassign = one_form("(SET 'XS 99)");
    {
        let mut ctx = EvalContext::new(&mut env, &mut out);
        evaluate(&reassign, &mut ctx, 0).unwrap().release_temporary();
    }

    assert_eq!(
        held_child.strong_count(),
        1,
        "SET must release the variable's previous list, not leak its children — only this test's own handle should remain"
    );
}

#[test]
fn quote_round_trips_through_print_and_reparse() {
    let quoted = one_form("'(1 2 3)");
    assert_eq!(quoted.to_string(), "(QUOTE (1 2 3))");

    let mut env = Environment::new();
    let mut out = CollectPrint::new();
    let mut ctx = EvalContext::new(&mut env, &mut out);
    let value = evaluate(&quoted, &mut ctx, 0).unwrap();
    assert_eq!(value.to_string(), "(1 2 3)");

    // Re-parsing the printed form yields a structurally equivalent AST.
    let reparsed = one_form(&value.to_string());
    assert!(value.prints_same_as(&reparsed));
}

#[test]
fn pure_expressions_are_idempotent_across_repeated_evaluation() {
    let mut env = Environment::new();
    let mut out = CollectPrint::new();

    // `SET` to establish a value for `A`; only `(+ A 1 2)` below is the
    // pure expression under test.
    let setup = one_form("(SET 'A 7)");
    {
        let mut ctx = EvalContext::new(&mut env, &mut out);
        evaluate(&setup, &mut ctx, 0).unwrap().release_temporary();
    }

    let form = one_form("(+ A 1 2)");
    let first = {
        let mut ctx = EvalContext::new(&mut env, &mut out);
        evaluate(&form, &mut ctx, 0).unwrap()
    };
    let second = {
        let mut ctx = EvalContext::new(&mut env, &mut out);
        evaluate(&form, &mut ctx, 0).unwrap()
    };
    assert!(first.prints_same_as(&second));
    first.release_temporary();
    second.release_temporary();
}
