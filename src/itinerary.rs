//! Route and rest-stop derivations over a trip's legs.

use crate::entities::Leg;

/// Hours of continuous driving that earn one mandatory break.
pub const HOURS_PER_BREAK: f64 = 2.0;

/// Length of a single driving break.
pub const MINUTES_PER_BREAK: u32 = 10;

/// One break per full two hours of driving, truncating.
///
/// Negative or non-finite durations yield no breaks. Counts saturate at `u32::MAX`.
pub fn driving_breaks(travel_time_hours: f64) -> u32 {
    if !travel_time_hours.is_finite() || travel_time_hours <= 0.0 {
        return 0;
    }

    (travel_time_hours / HOURS_PER_BREAK).floor() as u32
}

pub fn break_minutes(driving_breaks: u32) -> u32 {
    driving_breaks.saturating_mul(MINUTES_PER_BREAK)
}

pub fn total_driving_breaks(legs: &[Leg]) -> u32 {
    legs.iter()
        .map(Leg::driving_breaks)
        .fold(0, u32::saturating_add)
}

pub fn total_break_minutes(legs: &[Leg]) -> u32 {
    legs.iter()
        .map(Leg::break_minutes)
        .fold(0, u32::saturating_add)
}

pub fn total_distance_km(legs: &[Leg]) -> f64 {
    legs.iter().map(|leg| leg.distance_km).sum()
}

pub fn total_travel_time_hours(legs: &[Leg]) -> f64 {
    legs.iter().map(|leg| leg.travel_time_hours).sum()
}

/// The first leg's origin followed by every leg's destination.
///
/// Legs are concatenated as given: a leg whose origin differs from the previous
/// destination is not reported, so the result is a display aid rather than a path.
pub fn route_waypoints(legs: &[Leg]) -> Vec<String> {
    let Some(first) = legs.first() else {
        return Vec::new();
    };

    let mut waypoints = Vec::with_capacity(legs.len() + 1);
    waypoints.push(first.origin.clone());
    waypoints.extend(legs.iter().map(|leg| leg.destination.clone()));
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(origin: &str, destination: &str, hours: f64) -> Leg {
        Leg::new(origin, destination, hours * 100.0, hours)
    }

    #[test]
    fn one_break_per_two_hours() {
        assert_eq!(driving_breaks(1.0), 0);
        assert_eq!(driving_breaks(2.0), 1);
        assert_eq!(driving_breaks(5.0), 2);
        assert_eq!(driving_breaks(8.0), 4);
        assert_eq!(driving_breaks(3.99), 1);
        assert_eq!(driving_breaks(0.0), 0);
        assert_eq!(driving_breaks(-4.0), 0);
        assert_eq!(driving_breaks(f64::NAN), 0);
    }

    #[test]
    fn ten_minutes_per_break() {
        assert_eq!(break_minutes(0), 0);
        assert_eq!(break_minutes(1), 10);
        assert_eq!(break_minutes(4), 40);
    }

    #[test]
    fn totals_sum_over_legs() {
        let legs = vec![leg("A", "B", 2.0), leg("B", "C", 4.0), leg("C", "D", 1.0)];

        assert_eq!(total_driving_breaks(&legs), 3);
        assert_eq!(total_break_minutes(&legs), 30);
        assert_eq!(total_distance_km(&legs), 700.0);
        assert_eq!(total_travel_time_hours(&legs), 7.0);
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(driving_breaks(1.0e10), u32::MAX);
        assert_eq!(break_minutes(u32::MAX), u32::MAX);

        let legs = vec![leg("A", "B", 1.0e10), leg("B", "C", 4.0)];
        assert_eq!(total_driving_breaks(&legs), u32::MAX);
        assert_eq!(total_break_minutes(&legs), u32::MAX);
    }

    #[test]
    fn waypoints_follow_leg_order() {
        let legs = vec![leg("A", "B", 1.0), leg("B", "C", 1.0), leg("C", "D", 1.0)];
        assert_eq!(route_waypoints(&legs), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn waypoints_do_not_check_continuity() {
        let legs = vec![leg("A", "B", 1.0), leg("X", "Y", 1.0)];
        assert_eq!(route_waypoints(&legs), vec!["A", "B", "Y"]);
    }

    #[test]
    fn no_legs_no_waypoints() {
        assert!(route_waypoints(&[]).is_empty());
        assert_eq!(total_distance_km(&[]), 0.0);
        assert_eq!(total_driving_breaks(&[]), 0);
    }
}
