use pretty_assertions::assert_eq;

use super::{solve, Fix, Recursion, Strategy};

/// A function defined as `f(x) = f(x)`.
struct Omega;

struct OmegaCtx {
    table: Fix<&'static str, &'static str>,
    calls: usize,
}

impl Recursion<OmegaCtx> for Omega {
    type Key = &'static str;
    type Value = &'static str;

    fn table(ctx: &mut OmegaCtx) -> &mut Fix<Self::Key, Self::Value> {
        &mut ctx.table
    }

    fn bottom(_ctx: &mut OmegaCtx, _key: &Self::Key) -> Self::Value {
        "bottom"
    }

    fn step(ctx: &mut OmegaCtx, key: &Self::Key) -> Self::Value {
        ctx.calls += 1;
        solve::<_, Omega>(ctx, *key)
    }
}

#[test]
fn omega_returns_bottom() {
    for strategy in
        [Strategy::SinglePass, Strategy::Iterate { max_passes: 10 }]
    {
        let mut ctx = OmegaCtx { table: Fix::new(strategy), calls: 0 };

        assert_eq!(solve::<_, Omega>(&mut ctx, "x"), "bottom");
        assert_eq!(solve::<_, Omega>(&mut ctx, "y"), "bottom");
        assert_eq!(ctx.calls, 2);

        // Already solved, the case analysis doesn't run again.
        assert_eq!(solve::<_, Omega>(&mut ctx, "x"), "bottom");
        assert_eq!(ctx.calls, 2);
        assert_eq!(ctx.table.len(), 2);
    }
}

/// Fibonacci numbers, for checking that results are memoized.
struct Fib;

struct FibCtx {
    table: Fix<u64, u64>,
    calls: usize,
}

impl Recursion<FibCtx> for Fib {
    type Key = u64;
    type Value = u64;

    fn table(ctx: &mut FibCtx) -> &mut Fix<u64, u64> {
        &mut ctx.table
    }

    fn bottom(_ctx: &mut FibCtx, _key: &u64) -> u64 {
        0
    }

    fn step(ctx: &mut FibCtx, key: &u64) -> u64 {
        ctx.calls += 1;
        match *key {
            0 | 1 => *key,
            n => solve::<_, Fib>(ctx, n - 1) + solve::<_, Fib>(ctx, n - 2),
        }
    }
}

#[test]
fn results_are_memoized() {
    let mut ctx =
        FibCtx { table: Fix::new(Strategy::SinglePass), calls: 0 };

    assert_eq!(solve::<_, Fib>(&mut ctx, 80), 23416728348467685);
    assert_eq!(ctx.calls, 81);

    ctx.table.clear();
    assert!(ctx.table.is_empty());
    assert_eq!(solve::<_, Fib>(&mut ctx, 10), 55);
    assert_eq!(ctx.calls, 92);
}

/// A system of boolean equations.
#[derive(Clone, Copy)]
enum Equation {
    Const(bool),
    Or(usize, usize),
    And(usize, usize),
}

struct Equations;

struct EquationsCtx {
    equations: Vec<Equation>,
    table: Fix<usize, bool>,
}

impl Recursion<EquationsCtx> for Equations {
    type Key = usize;
    type Value = bool;

    fn table(ctx: &mut EquationsCtx) -> &mut Fix<usize, bool> {
        &mut ctx.table
    }

    fn bottom(_ctx: &mut EquationsCtx, _key: &usize) -> bool {
        false
    }

    fn step(ctx: &mut EquationsCtx, key: &usize) -> bool {
        match ctx.equations[*key] {
            Equation::Const(value) => value,
            Equation::Or(a, b) => {
                let a = solve::<_, Equations>(ctx, a);
                let b = solve::<_, Equations>(ctx, b);
                a || b
            }
            Equation::And(a, b) => {
                let a = solve::<_, Equations>(ctx, a);
                let b = solve::<_, Equations>(ctx, b);
                a && b
            }
        }
    }
}

fn equations(strategy: Strategy) -> EquationsCtx {
    EquationsCtx {
        // x0 = x1 ∨ x2
        // x1 = x0 ∧ x0
        // x2 = true
        equations: vec![
            Equation::Or(1, 2),
            Equation::And(0, 0),
            Equation::Const(true),
        ],
        table: Fix::new(strategy),
    }
}

#[test]
fn single_pass_keeps_provisional_results() {
    let mut ctx = equations(Strategy::SinglePass);

    assert!(solve::<_, Equations>(&mut ctx, 0));
    // x1 was computed while x0 was still provisionally false.
    assert!(!solve::<_, Equations>(&mut ctx, 1));
}

#[test]
fn iteration_reaches_least_fixed_point() {
    let mut ctx = equations(Strategy::Iterate { max_passes: 10 });

    assert!(solve::<_, Equations>(&mut ctx, 0));
    assert!(solve::<_, Equations>(&mut ctx, 1));
    assert_eq!(ctx.table.get(&2), Some(&true));
}
