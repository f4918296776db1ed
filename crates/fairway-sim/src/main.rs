mod args;
mod score_store;
mod sim;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use fairway_golf::MiniGolf;
use fairway_golf::config::GolfConfig;
use fairway_golf::course::all_courses;
use fairway_golf::scoring::{relative_to_par, score_name};

use args::SimArgs;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = SimArgs::parse(std::env::args().skip(1));

    let course_count = all_courses().len();
    if args.course >= course_count {
        tracing::warn!(
            course = args.course,
            "No such course, playing hole {course_count}"
        );
    }
    let game = MiniGolf::for_course_index(args.course);
    let preset = game.config().clone();
    let mut game = game.with_config(GolfConfig::load_or(preset));

    tracing::info!(
        course = %game.course().name,
        par = game.course().par,
        shots = args.shots.len(),
        fps = args.fps,
        "Fairway sim starting"
    );

    let summary = sim::play(&mut game, &args.shots, args.fps);

    let snapshot = &summary.snapshot;
    if snapshot.finished {
        tracing::info!(
            strokes = snapshot.strokes,
            relative = relative_to_par(snapshot.strokes, snapshot.par),
            "{}",
            score_name(snapshot.strokes, snapshot.par)
        );
    } else {
        tracing::info!(strokes = snapshot.strokes, "Hole not finished");
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode summary");
            return ExitCode::FAILURE;
        },
    }

    if snapshot.finished
        && let Some(path) = &args.best_file
        && let Err(e) = score_store::record(path, snapshot.strokes)
    {
        tracing::error!(error = %e, "Failed to update best score");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
