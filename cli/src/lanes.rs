use intersection::{DecodedIntersection, DropReason, LaneOutcome};

pub fn run(decoded: &DecodedIntersection) {
    for line in describe(decoded) {
        println!("{}", line);
    }
}

fn describe(decoded: &DecodedIntersection) -> Vec<String> {
    let report = &decoded.report;
    let mut lines: Vec<String> = report
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            LaneOutcome::Emitted { lane, points } => format!("{}: {} points", lane, points),
            LaneOutcome::Dropped {
                lane,
                reason: DropReason::NoNodes,
            } => format!("{}: dropped, no nodes", lane),
            LaneOutcome::Dropped {
                lane,
                reason: DropReason::TooFewPoints(n),
            } => format!("{}: dropped, only {} points", lane, n),
            LaneOutcome::Failed(err) => format!("failed: {}", err),
        })
        .collect();
    lines.push(format!(
        "{} lanes: {} drawn, {} dropped, {} failed",
        util::prettyprint_usize(report.outcomes.len()),
        report.num_emitted(),
        report.num_dropped(),
        report.errors().len()
    ));
    lines
}
