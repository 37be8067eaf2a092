//! Per-service availability over a reporting window.
//!
//! Every incident is clipped to the window and charged to its service. Open
//! incidents (no `resolved_at`) are charged through the end of the window.
//! How concurrent incidents on one service combine is set by
//! [`OverlapPolicy`].

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vigil_types::{Incident, Service, ServiceAvailability, UNKNOWN_SERVICE};

/// How overlapping incidents on the same service are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Add every incident's clipped duration. Two concurrent one-hour
    /// incidents count as two hours of downtime.
    #[default]
    Sum,
    /// Merge overlapping intervals first, giving wall-clock downtime.
    Union,
}

impl OverlapPolicy {
    /// Returns the policy as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Union => "union",
        }
    }
}

impl std::fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OverlapPolicy {
    type Err = vigil_types::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "union" => Ok(Self::Union),
            _ => Err(vigil_types::ParseError::UnknownVariant {
                kind: "overlap policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Computes availability with the default [`OverlapPolicy::Sum`].
///
/// See [`compute_availability_with`].
#[must_use]
pub fn compute_availability(
    services: &[Service],
    incidents: &[Incident],
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
) -> Vec<ServiceAvailability> {
    compute_availability_with(
        services,
        incidents,
        period_start,
        period_end,
        OverlapPolicy::Sum,
    )
}

/// Computes availability for every service over `[period_start, period_end]`.
///
/// The result holds one entry per known service plus one per service name
/// that only appears on incidents, sorted by name. An empty or inverted
/// window yields an empty list.
#[must_use]
pub fn compute_availability_with(
    services: &[Service],
    incidents: &[Incident],
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    policy: OverlapPolicy,
) -> Vec<ServiceAvailability> {
    let period = period_end - period_start;
    if period <= Duration::zero() {
        return Vec::new();
    }

    let mut outages: BTreeMap<&str, Vec<(DateTime<Utc>, DateTime<Utc>)>> = BTreeMap::new();
    for service in services {
        if !service.name.is_empty() {
            outages.entry(service.name.as_str()).or_default();
        }
    }

    for incident in incidents {
        let name = if incident.service.is_empty() {
            UNKNOWN_SERVICE
        } else {
            incident.service.as_str()
        };
        let intervals = outages.entry(name).or_default();

        let incident_end = incident.resolved_at.unwrap_or(period_end);
        if incident_end < period_start
            || incident.created_at > period_end
            || incident.created_at > incident_end
        {
            continue;
        }

        let overlap_start = incident.created_at.max(period_start);
        let overlap_end = incident_end.min(period_end);
        if overlap_end > overlap_start {
            intervals.push((overlap_start, overlap_end));
        }
    }

    let availability: Vec<_> = outages
        .into_iter()
        .map(|(name, intervals)| {
            let downtime = match policy {
                OverlapPolicy::Sum => summed(&intervals),
                OverlapPolicy::Union => merged(intervals),
            }
            .max(Duration::zero());

            ServiceAvailability {
                service: name.to_string(),
                availability_percent: availability_percent(downtime, period),
                downtime_minutes: u64::try_from(downtime.num_minutes()).unwrap_or(0),
                period_start,
                period_end,
            }
        })
        .collect();

    debug!(
        services = availability.len(),
        incidents = incidents.len(),
        policy = %policy,
        "computed availability"
    );
    availability
}

fn availability_percent(downtime: Duration, period: Duration) -> f64 {
    let ratio = downtime.num_milliseconds() as f64 / period.num_milliseconds() as f64;
    (100.0 - ratio * 100.0).clamp(0.0, 100.0)
}

fn summed(intervals: &[(DateTime<Utc>, DateTime<Utc>)]) -> Duration {
    intervals
        .iter()
        .fold(Duration::zero(), |total, (start, end)| total + (*end - *start))
}

fn merged(mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)>) -> Duration {
    intervals.sort_unstable();

    let mut total = Duration::zero();
    let mut current: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for (start, end) in intervals {
        current = match current {
            Some((open_start, open_end)) if start <= open_end => {
                Some((open_start, open_end.max(end)))
            }
            Some((open_start, open_end)) => {
                total += open_end - open_start;
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((start, end)) = current {
        total += end - start;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vigil_types::{AlertId, AlertSeverity, IncidentId, IncidentStatus, ServiceId};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn service(name: &str) -> Service {
        Service {
            id: ServiceId::new(1),
            name: name.to_string(),
            description: String::new(),
            created_at: now() - Duration::days(30),
        }
    }

    fn incident(
        service: &str,
        created_at: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Incident {
        Incident {
            id: IncidentId::new(10),
            alert_id: AlertId::new(9),
            service: service.to_string(),
            title: "Outage".to_string(),
            severity: AlertSeverity::Critical,
            status: if resolved_at.is_some() {
                IncidentStatus::Resolved
            } else {
                IncidentStatus::Investigating
            },
            status_page_url: "/status/alt-000009".to_string(),
            created_at,
            resolved_at,
        }
    }

    mod availability_tests {
        use super::*;

        #[test]
        fn resolved_hour_in_three_hour_window() {
            let now = now();
            let result = compute_availability(
                &[service("payments")],
                &[incident(
                    "payments",
                    now - Duration::hours(2),
                    Some(now - Duration::hours(1)),
                )],
                now - Duration::hours(3),
                now,
            );

            assert_eq!(result.len(), 1);
            assert_eq!(result[0].service, "payments");
            assert_eq!(result[0].downtime_minutes, 60);
            assert!((result[0].availability_percent - 66.67).abs() < 0.01);
        }

        #[test]
        fn service_without_incidents_is_fully_available() {
            let now = now();
            let result =
                compute_availability(&[service("search")], &[], now - Duration::hours(24), now);

            assert_eq!(result.len(), 1);
            assert_eq!(result[0].service, "search");
            assert!((result[0].availability_percent - 100.0).abs() < f64::EPSILON);
            assert_eq!(result[0].downtime_minutes, 0);
            assert_eq!(result[0].period_start, now - Duration::hours(24));
            assert_eq!(result[0].period_end, now);
        }
    }

    mod window_tests {
        use super::*;
        use test_case::test_case;

        #[test_case(0 ; "empty window")]
        #[test_case(-1 ; "inverted window")]
        fn degenerate_window_yields_nothing(hours: i64) {
            let now = now();
            let result = compute_availability(
                &[service("search")],
                &[incident("search", now - Duration::hours(1), None)],
                now,
                now + Duration::hours(hours),
            );
            assert!(result.is_empty());
        }

        #[test]
        fn open_incident_charged_to_window_end() {
            let now = now();
            let result = compute_availability(
                &[],
                &[incident("search", now - Duration::minutes(30), None)],
                now - Duration::hours(1),
                now,
            );
            assert_eq!(result[0].downtime_minutes, 30);
            assert!((result[0].availability_percent - 50.0).abs() < 1e-9);
        }

        #[test]
        fn incident_clipped_to_window() {
            let now = now();
            let result = compute_availability(
                &[],
                &[incident(
                    "search",
                    now - Duration::hours(5),
                    Some(now - Duration::minutes(30)),
                )],
                now - Duration::hours(1),
                now,
            );
            assert_eq!(result[0].downtime_minutes, 30);
        }

        #[test_case(-5, Some(-4) ; "resolved before window")]
        #[test_case(1, None ; "created after window")]
        #[test_case(-1, Some(-2) ; "resolved before created")]
        fn skipped_incidents_leave_entry_at_full(created: i64, resolved: Option<i64>) {
            let now = now();
            let result = compute_availability(
                &[],
                &[incident(
                    "search",
                    now + Duration::hours(created),
                    resolved.map(|h| now + Duration::hours(h)),
                )],
                now - Duration::hours(3),
                now,
            );

            // the service still gets an entry even though nothing was charged
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].downtime_minutes, 0);
            assert!((result[0].availability_percent - 100.0).abs() < f64::EPSILON);
        }

        #[test]
        fn partial_minutes_are_floored() {
            let now = now();
            let result = compute_availability(
                &[],
                &[incident(
                    "search",
                    now - Duration::seconds(150),
                    Some(now),
                )],
                now - Duration::hours(1),
                now,
            );
            assert_eq!(result[0].downtime_minutes, 2);
        }
    }

    mod attribution_tests {
        use super::*;

        #[test]
        fn output_sorted_by_name_and_includes_incident_only_services() {
            let now = now();
            let result = compute_availability(
                &[service("search"), service("auth"), service("")],
                &[incident("payments", now - Duration::minutes(10), None)],
                now - Duration::hours(1),
                now,
            );
            let names: Vec<_> = result.iter().map(|a| a.service.as_str()).collect();
            assert_eq!(names, ["auth", "payments", "search"]);
        }

        #[test]
        fn empty_incident_service_is_unknown() {
            let now = now();
            let result = compute_availability(
                &[],
                &[incident("", now - Duration::minutes(10), None)],
                now - Duration::hours(1),
                now,
            );
            assert_eq!(result[0].service, UNKNOWN_SERVICE);
        }

        #[test]
        fn whitespace_names_are_kept_verbatim() {
            let now = now();
            let result = compute_availability(
                &[service(" ")],
                &[incident("  ", now - Duration::minutes(10), None)],
                now - Duration::hours(1),
                now,
            );
            let names: Vec<_> = result.iter().map(|a| a.service.as_str()).collect();
            assert_eq!(names, [" ", "  "]);
            assert_eq!(result[0].downtime_minutes, 0);
            assert_eq!(result[1].downtime_minutes, 10);
        }
    }

    mod overlap_tests {
        use super::*;
        use test_case::test_case;

        fn overlapping() -> Vec<Incident> {
            let now = now();
            vec![
                incident(
                    "payments",
                    now - Duration::hours(2),
                    Some(now - Duration::hours(1)),
                ),
                incident(
                    "payments",
                    now - Duration::minutes(90),
                    Some(now - Duration::minutes(30)),
                ),
            ]
        }

        #[test]
        fn sum_counts_overlap_twice() {
            let now = now();
            let result = compute_availability_with(
                &[],
                &overlapping(),
                now - Duration::hours(3),
                now,
                OverlapPolicy::Sum,
            );
            assert_eq!(result[0].downtime_minutes, 120);
        }

        #[test]
        fn union_counts_wall_clock() {
            let now = now();
            let result = compute_availability_with(
                &[],
                &overlapping(),
                now - Duration::hours(3),
                now,
                OverlapPolicy::Union,
            );
            assert_eq!(result[0].downtime_minutes, 90);
        }

        #[test]
        fn union_keeps_disjoint_intervals_apart() {
            let now = now();
            let incidents = vec![
                incident(
                    "payments",
                    now - Duration::hours(3),
                    Some(now - Duration::minutes(170)),
                ),
                incident(
                    "payments",
                    now - Duration::minutes(20),
                    Some(now - Duration::minutes(10)),
                ),
            ];
            let result = compute_availability_with(
                &[],
                &incidents,
                now - Duration::hours(4),
                now,
                OverlapPolicy::Union,
            );
            assert_eq!(result[0].downtime_minutes, 20);
        }

        #[test]
        fn sum_can_hit_zero_but_not_below() {
            let now = now();
            let incidents: Vec<_> = (0..3)
                .map(|_| incident("payments", now - Duration::hours(1), None))
                .collect();
            let result = compute_availability(&[], &incidents, now - Duration::hours(1), now);
            assert_eq!(result[0].downtime_minutes, 180);
            assert!(result[0].availability_percent.abs() < f64::EPSILON);
        }

        #[test_case("sum", OverlapPolicy::Sum)]
        #[test_case("UNION", OverlapPolicy::Union)]
        fn policy_parses(raw: &str, expected: OverlapPolicy) {
            assert_eq!(raw.parse::<OverlapPolicy>().unwrap(), expected);
        }

        #[test]
        fn unknown_policy_rejected() {
            assert!("merge".parse::<OverlapPolicy>().is_err());
        }
    }

    fn incidents_strategy() -> impl Strategy<Value = Vec<Incident>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["payments", "search", ""]),
                -600i64..600,
                prop::option::of(-600i64..600),
            ),
            0..8,
        )
        .prop_map(|specs| {
            let now = now();
            specs
                .into_iter()
                .map(|(name, created, resolved)| {
                    incident(
                        name,
                        now + Duration::minutes(created),
                        resolved.map(|m| now + Duration::minutes(m)),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn availability_stays_in_bounds(
            incidents in incidents_strategy(),
            window_minutes in 1i64..1440,
            union in any::<bool>(),
        ) {
            let now = now();
            let policy = if union { OverlapPolicy::Union } else { OverlapPolicy::Sum };
            let result = compute_availability_with(
                &[service("search")],
                &incidents,
                now - Duration::minutes(window_minutes),
                now,
                policy,
            );
            for entry in &result {
                prop_assert!((0.0..=100.0).contains(&entry.availability_percent));
            }
            prop_assert!(result.windows(2).all(|w| w[0].service < w[1].service));
        }

        #[test]
        fn union_never_exceeds_sum(incidents in incidents_strategy()) {
            let now = now();
            let start = now - Duration::hours(12);
            let sum = compute_availability_with(&[], &incidents, start, now, OverlapPolicy::Sum);
            let union = compute_availability_with(&[], &incidents, start, now, OverlapPolicy::Union);
            for (s, u) in sum.iter().zip(&union) {
                prop_assert_eq!(&s.service, &u.service);
                prop_assert!(u.downtime_minutes <= s.downtime_minutes);
            }
        }
    }
}
