//! Nearest-candidate selection over great-circle distance.

use crate::error::MatchError;
use crate::geo::{GeoPoint, distance_km};

/// A candidate that can report its geographic position.
///
/// Everything else a candidate carries (capacity, affiliated facility,
/// ...) is opaque to the matcher and carried through unexamined.
pub trait Positioned {
    fn position(&self) -> GeoPoint;
}

/// A successful match: the winning candidate and its distance from the
/// origin in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a, T> {
    pub candidate: &'a T,
    pub distance_km: f64,
}

/// Select the candidate nearest to `origin`.
///
/// The origin and every candidate location are validated up front, so a
/// malformed entry fails the call instead of silently losing every NaN
/// comparison. The scan keeps a running minimum with a strict `<`
/// comparison: candidates at exactly equal distance resolve to the
/// earliest one in input order. The input is never mutated.
///
/// An empty candidate list returns [`MatchError::NoCandidates`]; the
/// caller decides whether that fails the request or maps to a
/// "none available" reply.
pub fn find_nearest<'a, T: Positioned>(
    origin: GeoPoint,
    candidates: &'a [T],
) -> Result<Match<'a, T>, MatchError> {
    origin
        .validate()
        .map_err(|e| MatchError::invalid("origin", e))?;
    for (i, candidate) in candidates.iter().enumerate() {
        candidate
            .position()
            .validate()
            .map_err(|e| MatchError::invalid(format!("candidate {i}"), e))?;
    }

    let mut iter = candidates.iter();
    let Some(first) = iter.next() else {
        return Err(MatchError::NoCandidates);
    };

    let mut best = Match {
        candidate: first,
        distance_km: distance_km(origin, first.position()),
    };
    for candidate in iter {
        let d = distance_km(origin, candidate.position());
        if d < best.distance_km {
            best = Match {
                candidate,
                distance_km: d,
            };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Unit {
        id: &'static str,
        at: GeoPoint,
    }

    impl Unit {
        fn new(id: &'static str, lat: f64, lon: f64) -> Self {
            Self {
                id,
                at: GeoPoint::new(lat, lon),
            }
        }
    }

    impl Positioned for Unit {
        fn position(&self) -> GeoPoint {
            self.at
        }
    }

    const ORIGIN: GeoPoint = GeoPoint {
        lat: 17.4959,
        lon: 78.3926,
    };

    #[test]
    fn empty_list_returns_no_candidates() {
        let units: [Unit; 0] = [];
        assert_eq!(find_nearest(ORIGIN, &units), Err(MatchError::NoCandidates));
    }

    #[test]
    fn single_candidate_always_wins() {
        let units = [Unit::new("only", -33.86, 151.21)];
        let m = find_nearest(ORIGIN, &units).unwrap();
        assert_eq!(m.candidate.id, "only");
        assert!(m.distance_km > 9000.0);
    }

    #[test]
    fn selects_nearby_unit_over_distant_one() {
        // Roughly Hyderabad vs. Bangalore
        let units = [
            Unit::new("A", 17.5, 78.4),
            Unit::new("B", 12.97, 77.59),
        ];
        let m = find_nearest(ORIGIN, &units).unwrap();
        assert_eq!(m.candidate.id, "A");
        assert!(m.distance_km < 10.0, "got {}", m.distance_km);
    }

    #[test]
    fn selection_is_order_independent_for_distinct_distances() {
        let units = [
            Unit::new("B", 12.97, 77.59),
            Unit::new("A", 17.5, 78.4),
        ];
        let m = find_nearest(ORIGIN, &units).unwrap();
        assert_eq!(m.candidate.id, "A");
    }

    #[test]
    fn winner_is_no_farther_than_any_other_candidate() {
        let units = [
            Unit::new("n", 17.6, 78.5),
            Unit::new("e", 17.4, 78.3),
            Unit::new("s", 17.2, 78.6),
            Unit::new("w", 17.9, 78.1),
        ];
        let m = find_nearest(ORIGIN, &units).unwrap();
        for unit in &units {
            assert!(m.distance_km <= distance_km(ORIGIN, unit.position()));
        }
    }

    #[test]
    fn equal_distances_keep_the_first_candidate() {
        // Both one degree of longitude from (0, 0), mirrored
        let origin = GeoPoint::new(0.0, 0.0);
        let units = [Unit::new("X", 0.0, 1.0), Unit::new("Y", 0.0, -1.0)];
        for _ in 0..3 {
            let m = find_nearest(origin, &units).unwrap();
            assert_eq!(m.candidate.id, "X");
            assert!((m.distance_km - 111.19).abs() < 0.1);
        }
    }

    #[test]
    fn all_candidates_at_origin_keep_the_first() {
        let units = [
            Unit::new("first", ORIGIN.lat, ORIGIN.lon),
            Unit::new("second", ORIGIN.lat, ORIGIN.lon),
        ];
        let m = find_nearest(ORIGIN, &units).unwrap();
        assert_eq!(m.candidate.id, "first");
        assert_eq!(m.distance_km, 0.0);
    }

    #[test]
    fn malformed_candidate_fails_fast() {
        let units = [
            Unit::new("ok", 17.5, 78.4),
            Unit::new("bad", f64::NAN, 78.4),
        ];
        let err = find_nearest(ORIGIN, &units).unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidLocation { ref subject, .. } if subject == "candidate 1"
        ));
    }

    #[test]
    fn out_of_range_origin_fails_fast() {
        let units = [Unit::new("ok", 17.5, 78.4)];
        let err = find_nearest(GeoPoint::new(91.0, 0.0), &units).unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidLocation { ref subject, .. } if subject == "origin"
        ));
    }

    #[test]
    fn input_order_is_preserved() {
        let units = [
            Unit::new("A", 17.5, 78.4),
            Unit::new("B", 12.97, 77.59),
        ];
        let _ = find_nearest(ORIGIN, &units).unwrap();
        assert_eq!(units[0].id, "A");
        assert_eq!(units[1].id, "B");
    }
}
