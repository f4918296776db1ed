use std::path::PathBuf;

/// Where a scripted shot is aimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Straight at the hole from wherever the ball sits.
    Hole,
    /// Absolute aim angle in degrees (0 = +Z, 90 = +X).
    Degrees(f32),
}

/// One scripted stroke: aim and power on the course's power scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub aim: Aim,
    pub power: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimArgs {
    pub course: usize,
    pub shots: Vec<Shot>,
    pub best_file: Option<PathBuf>,
    pub fps: u32,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            course: 0,
            shots: vec![Shot {
                aim: Aim::Hole,
                power: 100.0,
            }],
            best_file: None,
            fps: 60,
        }
    }
}

impl SimArgs {
    /// Parse `--key=value` arguments. Unknown or malformed values are logged
    /// and left at their defaults.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            if let Some(v) = arg.strip_prefix("--course=") {
                match v.parse::<usize>() {
                    Ok(course) => parsed.course = course,
                    Err(_) => tracing::warn!(value = v, "Ignoring bad --course"),
                }
            } else if let Some(v) = arg.strip_prefix("--shots=") {
                parsed.shots = v.split(',').filter_map(parse_shot).collect();
            } else if let Some(v) = arg.strip_prefix("--best-file=") {
                parsed.best_file = Some(PathBuf::from(v));
            } else if let Some(v) = arg.strip_prefix("--fps=") {
                match v.parse::<u32>() {
                    Ok(fps) if fps > 0 => parsed.fps = fps,
                    _ => tracing::warn!(value = v, "Ignoring bad --fps"),
                }
            } else {
                tracing::warn!(arg = %arg, "Unknown argument");
            }
        }
        parsed
    }
}

/// `<angle_deg|hole>:<power>`
fn parse_shot(item: &str) -> Option<Shot> {
    let item = item.trim();
    if item.is_empty() {
        return None;
    }
    let Some((aim, power)) = item.split_once(':') else {
        tracing::warn!(shot = item, "Shot needs <angle>:<power>, skipping");
        return None;
    };
    let aim = if aim.eq_ignore_ascii_case("hole") {
        Aim::Hole
    } else {
        match aim.parse::<f32>() {
            Ok(deg) if deg.is_finite() => Aim::Degrees(deg),
            _ => {
                tracing::warn!(shot = item, "Bad shot angle, skipping");
                return None;
            },
        }
    };
    match power.parse::<f32>() {
        Ok(power) if power.is_finite() && power > 0.0 => Some(Shot { aim, power }),
        _ => {
            tracing::warn!(shot = item, "Bad shot power, skipping");
            None
        },
    }
}
