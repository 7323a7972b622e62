//! `CostContext` wrapper and the combinators used to thread hashing work
//! through fallible computations.

use crate::OperationCost;

/// A value together with the hashing work spent producing it.
#[must_use]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Produced value.
    pub value: T,
    /// Work spent.
    pub cost: OperationCost,
}

/// A fallible computation that reports its work whether or not it failed.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T> CostContext<T> {
    /// Move the cost into `acc` and return the value.
    pub fn unwrap_add_cost(self, acc: &mut OperationCost) -> T {
        *acc += self.cost;
        self.value
    }

    /// Return the value, forgetting the cost.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Transform the value, keeping the cost.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }
}

impl<T, E> CostResult<T, E> {
    /// Transform the error, keeping the cost.
    pub fn map_err<B>(self, f: impl FnOnce(E) -> B) -> CostResult<T, B> {
        self.map(|result| result.map_err(f))
    }

    /// Plain `Result` carrying the cost alongside the value. The cost of a
    /// failed computation is dropped.
    pub fn into_result_with_cost(self) -> Result<(T, OperationCost), E> {
        let cost = self.cost;
        self.value.map(|value| (value, cost))
    }
}

/// Attach a cost to any value.
pub trait CostsExt: Sized {
    /// Pair `self` with `cost`.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self> {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// Unwrap a `CostResult` expression, adding its cost to the accumulator
/// `$cost`. On error, return early from the enclosing function with the
/// error and everything accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {{
        use $crate::CostsExt;
        let result = { $($body)+ }.unwrap_add_cost(&mut $cost);
        match result {
            Ok(x) => x,
            Err(e) => return Err(e).wrap_with_cost($cost),
        }
    }};
}

/// Like [`cost_return_on_error!`] for a plain `Result`: nothing is added to
/// `$cost`, but an early return still carries it.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {{
        use $crate::CostsExt;
        let result = { $($body)+ };
        match result {
            Ok(x) => x,
            Err(e) => return Err(e).wrap_with_cost($cost),
        }
    }};
}
