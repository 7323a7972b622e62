use dah_costs::{
    cost_return_on_error, cost_return_on_error_no_add, CostContext, CostResult, CostsExt,
    OperationCost,
};

fn hash_row(leaves: u32) -> CostResult<u32, String> {
    Ok(leaves).wrap_with_cost(OperationCost {
        hash_leaf_calls: leaves,
        hash_node_calls: leaves.saturating_sub(1),
        pushed_shares: leaves,
    })
}

fn check_width(width: u32) -> Result<u32, String> {
    if width % 2 == 0 {
        Ok(width)
    } else {
        Err(format!("odd width {}", width))
    }
}

fn hash_square(width: u32) -> CostResult<u32, String> {
    let mut cost = OperationCost::default();
    let width = cost_return_on_error_no_add!(&cost, check_width(width));
    let mut total = 0;
    for _ in 0..width {
        total += cost_return_on_error!(&mut cost, hash_row(width));
    }
    Ok(total).wrap_with_cost(cost)
}

#[test]
fn accumulates_costs_across_rows() {
    let (total, cost) = hash_square(4)
        .into_result_with_cost()
        .expect("even width is accepted");
    assert_eq!(total, 16);
    assert_eq!(cost.hash_leaf_calls, 16);
    assert_eq!(cost.hash_node_calls, 12);
    assert_eq!(cost.pushed_shares, 16);
}

#[test]
fn early_return_carries_no_cost_before_work() {
    let ctx = hash_square(3);
    assert!(ctx.cost.is_nothing());
    assert_eq!(ctx.value, Err("odd width 3".to_string()));
}

#[test]
fn error_after_work_keeps_accumulated_cost() {
    fn failing_row() -> CostResult<u32, String> {
        Err("bad share".to_string()).wrap_with_cost(OperationCost::with_pushed_shares(1))
    }

    fn hash_until_failure() -> CostResult<u32, String> {
        let mut cost = OperationCost::default();
        cost_return_on_error!(&mut cost, hash_row(2));
        cost_return_on_error!(&mut cost, failing_row());
        Ok(0).wrap_with_cost(cost)
    }

    let ctx = hash_until_failure();
    assert_eq!(ctx.value, Err("bad share".to_string()));
    assert_eq!(ctx.cost.hash_leaf_calls, 2);
    assert_eq!(ctx.cost.pushed_shares, 3);
}

#[test]
fn unwrap_add_cost_moves_cost_into_accumulator() {
    let ctx: CostContext<Vec<u8>> =
        vec![1u8, 2, 3].wrap_with_cost(OperationCost::with_pushed_shares(3));
    let mut acc = OperationCost::with_hash_node_calls(2);
    let value = ctx.unwrap_add_cost(&mut acc);
    assert_eq!(value, vec![1, 2, 3]);
    assert_eq!(acc.pushed_shares, 3);
    assert_eq!(acc.hash_node_calls, 2);
}
