use super::transform::WorldPoint;

/// Upper bound on segments per quadratic piece.
const MAX_SEGMENTS_PER_CURVE: usize = 64;

/// A polyline vertex carrying the width multiplier at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub pos: WorldPoint,
    pub weight: f64,
}

impl PathSample {
    pub fn new(pos: WorldPoint, weight: f64) -> Self {
        Self { pos, weight }
    }

    fn midpoint(a: PathSample, b: PathSample) -> PathSample {
        PathSample::new(
            WorldPoint::new((a.pos.x + b.pos.x) / 2.0, (a.pos.y + b.pos.y) / 2.0),
            (a.weight + b.weight) / 2.0,
        )
    }
}

/// Smooths a sparse point list into a dense polyline.
///
/// Starts at the first sample, then for every interior sample draws a
/// quadratic curve controlled by that sample and ending at the midpoint
/// towards the next one, and finishes with a straight piece into the last
/// sample. Each curve is flattened so no segment spans more than
/// `max_segment_len` world units.
pub fn smooth_polyline(samples: &[PathSample], max_segment_len: f64) -> Vec<PathSample> {
    let Some((&first, _)) = samples.split_first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    if samples.len() < 3 {
        out.extend_from_slice(&samples[1..]);
        return out;
    }

    let mut current = first;
    for pair in samples[1..].windows(2) {
        let control = pair[0];
        let end = PathSample::midpoint(pair[0], pair[1]);
        flatten_quadratic(current, control, end, max_segment_len, &mut out);
        current = end;
    }
    if let Some(&last) = samples.last() {
        out.push(last);
    }
    out
}

fn flatten_quadratic(
    start: PathSample,
    control: PathSample,
    end: PathSample,
    max_segment_len: f64,
    out: &mut Vec<PathSample>,
) {
    // |B'(t)| never exceeds twice the longer control leg.
    let max_speed = 2.0 * start.pos.distance(control.pos).max(control.pos.distance(end.pos));
    let step = max_segment_len.max(f64::EPSILON);
    let segments = ((max_speed / step).ceil() as usize).clamp(1, MAX_SEGMENTS_PER_CURVE);

    for i in 1..=segments {
        let t = i as f64 / segments as f64;
        let mt = 1.0 - t;
        let a = mt * mt;
        let b = 2.0 * mt * t;
        let c = t * t;
        out.push(PathSample::new(
            WorldPoint::new(
                a * start.pos.x + b * control.pos.x + c * end.pos.x,
                a * start.pos.y + b * control.pos.y + c * end.pos.y,
            ),
            start.weight + (end.weight - start.weight) * t,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64) -> PathSample {
        PathSample::new(WorldPoint::new(x, y), 1.0)
    }

    #[test]
    fn short_inputs_pass_through() {
        assert!(smooth_polyline(&[], 1.0).is_empty());
        assert_eq!(smooth_polyline(&[sample(1.0, 2.0)], 1.0), vec![sample(1.0, 2.0)]);
        let pair = [sample(0.0, 0.0), sample(5.0, 5.0)];
        assert_eq!(smooth_polyline(&pair, 1.0), pair.to_vec());
    }

    #[test]
    fn keeps_endpoints_and_passes_through_midpoints() {
        let points = [sample(0.0, 0.0), sample(10.0, 0.0), sample(10.0, 10.0), sample(20.0, 10.0)];
        let out = smooth_polyline(&points, 0.5);
        assert_eq!(out.first().unwrap().pos, WorldPoint::new(0.0, 0.0));
        assert_eq!(out.last().unwrap().pos, WorldPoint::new(20.0, 10.0));
        for mid in [WorldPoint::new(10.0, 5.0), WorldPoint::new(15.0, 10.0)] {
            assert!(out.iter().any(|s| s.pos.distance(mid) < 1e-9), "missing {mid:?}");
        }
        // The corner at (10, 0) is cut, not visited.
        assert!(out.iter().all(|s| s.pos.distance(WorldPoint::new(10.0, 0.0)) > 1.0));
    }

    #[test]
    fn segment_length_is_bounded() {
        let points = [sample(0.0, 0.0), sample(40.0, 0.0), sample(40.0, 40.0)];
        let out = smooth_polyline(&points, 2.0);
        for pair in out[..out.len() - 1].windows(2) {
            assert!(pair[0].pos.distance(pair[1].pos) <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn weights_are_interpolated() {
        let points = [
            PathSample::new(WorldPoint::new(0.0, 0.0), 0.0),
            PathSample::new(WorldPoint::new(10.0, 0.0), 1.0),
            PathSample::new(WorldPoint::new(20.0, 0.0), 1.0),
        ];
        let out = smooth_polyline(&points, 1.0);
        assert!(out.windows(2).all(|w| w[0].weight <= w[1].weight + 1e-12));
        assert_eq!(out.last().unwrap().weight, 1.0);
    }
}
