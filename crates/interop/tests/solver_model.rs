//! End-to-end solving through the owning wrappers.

use std::sync::Arc;

use z3wrap_interop::{Context, SatStatus, Z3Error, Z3Library};

// ---- Helper ----

fn context() -> Option<Context> {
    match Z3Library::load_auto() {
        Ok(library) => Some(Context::new(Arc::new(library)).unwrap()),
        Err(err) => {
            eprintln!("skipping: Z3 not available ({err})");
            None
        }
    }
}

// ============================================================
// Checking
// ============================================================

#[test]
fn simple_sat_with_model() {
    let Some(ctx) = context() else { return };
    let x = ctx.int_const("x").unwrap();
    let solver = ctx.solver().unwrap();
    solver.assert(&x.gt(&ctx.int_val(0).unwrap()).unwrap()).unwrap();
    solver.assert(&x.lt(&ctx.int_val(10).unwrap()).unwrap()).unwrap();

    let result = solver.check_with_model().unwrap();
    assert!(result.is_sat(), "Expected SAT, got: {result:?}");
    let model = result.model().expect("Expected model in SAT result");
    let value: i64 = model
        .eval_numeral(&x)
        .unwrap()
        .expect("x has a value")
        .parse()
        .expect("x should be a plain integer");
    assert!(value > 0 && value < 10, "x = {value}, expected 0 < x < 10");
    assert!(model.to_string().contains("x"));
}

#[test]
fn simple_unsat() {
    let Some(ctx) = context() else { return };
    let x = ctx.int_const("x").unwrap();
    let solver = ctx.solver().unwrap();
    solver.assert(&x.gt(&ctx.int_val(5).unwrap()).unwrap()).unwrap();
    solver.assert(&x.lt(&ctx.int_val(3).unwrap()).unwrap()).unwrap();

    assert_eq!(solver.check().unwrap(), SatStatus::Unsat);
    assert_eq!(solver.model().unwrap_err(), Z3Error::ModelUnavailable);
    assert!(solver.check_with_model().unwrap().is_unsat());
}

#[test]
fn boolean_model_values() {
    let Some(ctx) = context() else { return };
    let p = ctx.bool_const("p").unwrap();
    let q = ctx.bool_const("q").unwrap();
    let solver = ctx.simple_solver().unwrap();
    solver.assert(&ctx.and(&[&p, &q.not().unwrap()]).unwrap()).unwrap();

    let model = solver.check_with_model().unwrap().into_model().unwrap();
    assert_eq!(model.eval_bool(&p).unwrap(), Some(true));
    assert_eq!(model.eval_bool(&q).unwrap(), Some(false));
}

#[test]
fn model_completion_assigns_unconstrained_constants() {
    let Some(ctx) = context() else { return };
    let x = ctx.int_const("x").unwrap();
    let y = ctx.int_const("y").unwrap();
    let solver = ctx.solver().unwrap();
    solver.assert(&x.equals(&ctx.int_val(3).unwrap()).unwrap()).unwrap();
    assert_eq!(solver.check().unwrap(), SatStatus::Sat);

    let model = solver.model().unwrap();
    let completed = model.eval(&y, true).unwrap().expect("completion yields a value");
    assert!(completed.numeral_string().is_ok());
    assert_eq!(model.eval_numeral(&x).unwrap().as_deref(), Some("3"));
}

#[test]
fn disjunction_is_satisfiable() {
    let Some(ctx) = context() else { return };
    let p = ctx.bool_const("p").unwrap();
    let solver = ctx.solver().unwrap();
    solver.assert(&ctx.or(&[&p, &p.not().unwrap()]).unwrap()).unwrap();
    assert_eq!(solver.check().unwrap(), SatStatus::Sat);
}

// ============================================================
// Remembered status
// ============================================================

#[test]
fn assertion_invalidates_previous_status() {
    let Some(ctx) = context() else { return };
    let x = ctx.int_const("x").unwrap();
    let solver = ctx.solver().unwrap();
    assert_eq!(solver.last_status(), None);

    assert_eq!(solver.check().unwrap(), SatStatus::Sat);
    assert_eq!(solver.last_status(), Some(SatStatus::Sat));
    let model = solver.model().unwrap();

    solver.assert(&x.gt(&ctx.int_val(1).unwrap()).unwrap()).unwrap();
    assert_eq!(solver.last_status(), None);
    assert_eq!(solver.model().unwrap_err(), Z3Error::ModelUnavailable);

    // A model taken earlier keeps its own reference.
    let _ = model.to_string();
}

#[test]
fn push_pop_scopes_assertions() {
    let Some(ctx) = context() else { return };
    let x = ctx.int_const("x").unwrap();
    let solver = ctx.solver().unwrap();
    solver.assert(&x.gt(&ctx.int_val(5).unwrap()).unwrap()).unwrap();

    solver.push().unwrap();
    solver.assert(&x.lt(&ctx.int_val(3).unwrap()).unwrap()).unwrap();
    assert_eq!(solver.check().unwrap(), SatStatus::Unsat);
    solver.pop(1).unwrap();
    assert_eq!(solver.last_status(), None);

    assert_eq!(solver.check().unwrap(), SatStatus::Sat);
}

#[test]
fn reset_clears_assertions() {
    let Some(ctx) = context() else { return };
    let solver = ctx.solver().unwrap();
    solver.assert(&ctx.bool_val(false).unwrap()).unwrap();
    assert_eq!(solver.check().unwrap(), SatStatus::Unsat);

    solver.reset().unwrap();
    assert_eq!(solver.last_status(), None);
    assert_eq!(solver.check().unwrap(), SatStatus::Sat);
}

#[test]
fn interrupting_an_idle_context_is_harmless() {
    let Some(ctx) = context() else { return };
    ctx.interrupt().unwrap();
    ctx.check_error().unwrap();
}

// ============================================================
// Parameters
// ============================================================

#[test]
fn context_parameters_apply_at_creation() {
    let Some(ctx) = context() else { return };
    let library = Arc::clone(ctx.library());
    let tuned = Context::with_params(library, &[("model", "true")]).unwrap();
    let solver = tuned.solver().unwrap();
    assert_eq!(solver.check().unwrap(), SatStatus::Sat);
}

#[test]
fn solver_parameters() {
    let Some(ctx) = context() else { return };
    let params = match ctx.params() {
        Ok(params) => params,
        Err(Z3Error::FunctionUnavailable { .. }) => return,
        Err(err) => panic!("unexpected error: {err}"),
    };
    params.set_u32("timeout", 10_000).unwrap();
    let text = params.to_string();
    assert!(text.contains("timeout"), "{text}");

    let solver = ctx.solver().unwrap();
    solver.set_params(&params).unwrap();
    assert_eq!(solver.check().unwrap(), SatStatus::Sat);
}

#[test]
fn cloned_terms_release_independently() {
    let Some(ctx) = context() else { return };
    let x = ctx.int_const("x").unwrap();
    let copy = x.clone();
    drop(x);
    assert_eq!(copy.to_string(), "x");
    let sort = copy.sort().unwrap();
    let sort_copy = sort.clone();
    drop(sort);
    assert_eq!(sort_copy.to_string(), "Int");
}
