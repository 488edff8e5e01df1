use crate::types::Team;

/// Apply a turn's running delta to a team total, flooring the total at zero.
/// The delta itself is never floored.
pub fn apply_delta(score: i32, delta: i32) -> i32 {
    (score + delta).max(0)
}

/// Teams sorted by score descending. Ties keep their input order.
pub fn leaderboard(teams: &[Team]) -> Vec<Team> {
    let mut sorted = teams.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted
}
