use tablekick_core::side::Side;

use crate::goal::GoalArea;

/// A team's score is the number of balls in the goal it attacks, which is
/// the opponent's goal: the left team scores on the right goal's counter.
pub fn team_score(side: Side, left_goal: &GoalArea, right_goal: &GoalArea) -> u32 {
    match side {
        Side::Left => right_goal.points(),
        Side::Right => left_goal.points(),
    }
}
