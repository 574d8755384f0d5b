// Motion checking, start/goal repair and path simplification on a
// planar space with a square obstacle in the middle.
use kinematic_core::kinematic::{FixOutcome, Goal, ProblemDefinition};
use kinematic_core::{
    KinematicPath, KinematicsResult, PathSimplifier, SpaceInformation, State, StateRepairer,
    StateSpace,
};

const SEED: u64 = 7;

fn obstacle_free(s: &State) -> bool {
    (s[0] - 5.0).abs() > 1.0 || (s[1] - 5.0).abs() > 1.0
}

fn main() -> KinematicsResult<()> {
    println!("path simplification start!!");

    let space = StateSpace::builder()
        .linear(0.0, 10.0, 0.1)
        .linear(0.0, 10.0, 0.1)
        .build()?;
    let si = SpaceInformation::new(space, obstacle_free);

    let start = si.space().state_from_slice(&[-1.0, 12.0])?;
    let goal = si.space().state_from_slice(&[5.5, 5.5])?;
    let mut problem = ProblemDefinition::new(vec![start], Goal::State(goal));

    let mut repairer = StateRepairer::new(&si, SEED);
    let report = repairer.fix_invalid_input_states(&mut problem, &[0.5, 0.5], &[2.0, 2.0], 100);
    println!("start fixes: {:?}, goal fix: {:?}", report.starts, report.goal);
    if report.starts.contains(&FixOutcome::Unfixable) || report.goal == FixOutcome::Unfixable {
        println!("could not repair the problem");
        return Ok(());
    }

    let start = problem.start_states[0].clone();
    let goal = match &problem.goal {
        Some(Goal::State(g)) => g.clone(),
        _ => return Ok(()),
    };
    println!("start {} goal {}", start, goal);

    // a staircase path around the obstacle
    let mut path = KinematicPath::new();
    path.push(start.clone());
    let mut corner = start.clone();
    while (corner[0] - 9.0).abs() > 1e-9 {
        corner[0] = (corner[0] + 1.0).min(9.0);
        path.push(corner.clone());
    }
    path.push(si.space().state_from_slice(&[9.0, goal[1]])?);
    path.push(goal);
    si.interpolate_path(&mut path, 5.0);

    println!(
        "initial path: {} states, length {:.3}, valid {}",
        path.len(),
        path.length(si.space()),
        si.check_path(&path)
    );

    let mut simplifier = PathSimplifier::new(&si, SEED);
    simplifier.simplify_max(&mut path);

    println!(
        "simplified path: {} states, length {:.3}, valid {}",
        path.len(),
        path.length(si.space()),
        si.check_path(&path)
    );
    for s in &path.states {
        println!("  {}", s);
    }

    Ok(())
}
