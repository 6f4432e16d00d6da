use super::types::{FireProjection, InflatingGoalProjection, ProgressTier};

/// Year cap standing in for "never realistically reaches the goal".
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Portfolio size whose `withdrawal_rate` share covers `annual_expenses`.
pub fn fire_number(annual_expenses: f64, withdrawal_rate: f64) -> f64 {
    if withdrawal_rate <= 0.0 {
        return f64::INFINITY;
    }
    annual_expenses / withdrawal_rate
}

/// Net worth counted toward the goal; illiquid assets only on request.
pub fn investable_net_worth(
    liquid_assets: f64,
    illiquid_assets: f64,
    include_illiquid: bool,
) -> f64 {
    if include_illiquid {
        liquid_assets + illiquid_assets
    } else {
        liquid_assets
    }
}

/// Share of `goal` already covered, capped at 1.
pub fn fire_progress(net_worth: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 1.0;
    }
    (net_worth / goal).min(1.0)
}

/// Buckets progress into quarter milestones.
pub fn progress_tier(progress: f64) -> ProgressTier {
    if progress >= 1.0 {
        ProgressTier::Reached
    } else if progress >= 0.75 {
        ProgressTier::AlmostThere
    } else if progress >= 0.5 {
        ProgressTier::Halfway
    } else if progress >= 0.25 {
        ProgressTier::Underway
    } else {
        ProgressTier::JustStarted
    }
}

/// Compounds `annual_savings` into `current_net_worth` until `target_goal` is
/// met or [`MAX_PROJECTION_YEARS`] have passed.
///
/// Each year the savings are deposited first and the whole balance then grows
/// by `annual_return`. A result with `reached == false` means the cap was hit.
pub fn project(
    current_net_worth: f64,
    annual_savings: f64,
    annual_return: f64,
    target_goal: f64,
) -> FireProjection {
    if current_net_worth >= target_goal {
        return FireProjection {
            years_to_target: 0,
            final_net_worth: current_net_worth,
            net_worth_history: vec![current_net_worth],
            reached: true,
        };
    }

    let mut net_worth = current_net_worth;
    let mut history = Vec::with_capacity(MAX_PROJECTION_YEARS as usize + 1);
    history.push(net_worth);
    let mut years = 0;
    while net_worth < target_goal && years < MAX_PROJECTION_YEARS {
        net_worth = (net_worth + annual_savings) * (1.0 + annual_return);
        years += 1;
        history.push(net_worth);
    }

    let reached = net_worth >= target_goal;
    if !reached {
        log::debug!(
            "goal {target_goal:.0} not reached within {MAX_PROJECTION_YEARS} years (final {net_worth:.0})"
        );
    }

    FireProjection {
        years_to_target: years,
        final_net_worth: net_worth,
        net_worth_history: history,
        reached,
    }
}

/// Same search as [`project`], but the goal grows with inflation: in year `n`
/// it is `goal_today * (1 + inflation_rate)^n`.
pub fn project_with_inflating_goal(
    current_net_worth: f64,
    annual_savings: f64,
    annual_return: f64,
    goal_today: f64,
    inflation_rate: f64,
) -> InflatingGoalProjection {
    let mut net_worth = current_net_worth;
    let mut goal = goal_today;
    let mut history = vec![net_worth];
    let mut goal_history = vec![goal];
    let mut years = 0;

    while net_worth < goal && years < MAX_PROJECTION_YEARS {
        net_worth = (net_worth + annual_savings) * (1.0 + annual_return);
        years += 1;
        goal = goal_today * (1.0 + inflation_rate).powi(years as i32);
        history.push(net_worth);
        goal_history.push(goal);
    }

    let reached = net_worth >= goal;
    if !reached {
        log::debug!("inflating goal outpaced savings for {MAX_PROJECTION_YEARS} years");
    }

    InflatingGoalProjection {
        projection: FireProjection {
            years_to_target: years,
            final_net_worth: net_worth,
            net_worth_history: history,
            reached,
        },
        goal_history,
        final_goal: goal,
    }
}
