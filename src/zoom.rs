#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

/// Ladder rung at `index`, clamped to the ladder ends.
fn rung(ladder: &[f64], index: isize) -> f64 {
    let last = ladder.len() as isize - 1;
    let clamped = index.clamp(0, last);
    ladder[clamped as usize]
}

/// Next discrete scale below `current`.
///
/// On a rung, the step spans `1 + run_ahead` rungs. Between rungs the
/// landing is biased by how far the descent would travel: when half
/// the lower rung would overshoot it, the step lands one rung further
/// down, otherwise `run_ahead` alone decides. Scales at or below the
/// ladder pin to the first rung, scales above it pin to the last.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn next_scale_step_down(current: f64, run_ahead: usize, ladder: &[f64]) -> f64 {
    let (Some(&first), Some(&last)) = (ladder.first(), ladder.last()) else {
        return current;
    };
    if current <= first {
        return first;
    }
    if current > last {
        return last;
    }
    let run_ahead = run_ahead as isize;
    for (i, &step) in ladder.iter().enumerate() {
        let index = i as isize;
        if current == step {
            return rung(ladder, index - 1 - run_ahead);
        }
        if i + 1 < ladder.len() && current > step && current < ladder[i + 1] {
            if current - step / 2.0 < step {
                // The lower rung is less than half a step away.
                return rung(ladder, index - 1);
            }
            return rung(ladder, index - run_ahead);
        }
    }
    first
}

/// Next discrete scale above `current`.
///
/// The mirror of [`next_scale_step_down`]: on a rung the step spans
/// `1 + run_ahead` rungs, between rungs the landing skips the adjacent
/// rung when less than half a step of headroom remains below it.
/// Scales under the ladder enter it at rung `run_ahead`, scales at or
/// above the top pin to the last rung.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn next_scale_step_up(current: f64, run_ahead: usize, ladder: &[f64]) -> f64 {
    let (Some(&first), Some(&last)) = (ladder.first(), ladder.last()) else {
        return current;
    };
    if current < first {
        return rung(ladder, run_ahead as isize);
    }
    if current >= last {
        return last;
    }
    let run_ahead = run_ahead as isize;
    for (i, &step) in ladder.iter().enumerate() {
        let index = i as isize;
        if current == step {
            return rung(ladder, index + 1 + run_ahead);
        }
        if i + 1 < ladder.len() && current > step && current < ladder[i + 1] {
            let next = ladder[i + 1];
            if current + next / 2.0 > next {
                // Less than half a step of headroom below the next rung.
                return rung(ladder, index + 2);
            }
            return rung(ladder, index + 1 + run_ahead);
        }
    }
    last
}
