use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use czm_analytical::{Record, Specimen, SpecimenKind, SpecimenParameters};
use czm_io::{
    DesignOfExperiments, ExperimentDatabase, HistoryOutput, find_converged_increments, merge,
    read_first_record, run_post_processing,
};
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "czm",
    about = "Analytical models and simulation data of cohesive-zone fracture tests"
)]
enum Command {
    /// Predict the reaction force for the `Displacement` series of a record
    ReactionForce {
        /// ENF, ASLB or ADCB
        specimen: SpecimenKind,
        #[structopt(parse(from_os_str))]
        record: PathBuf,
    },

    /// Reconstruct the R-curve from the force-displacement history of a record
    RCurve {
        specimen: SpecimenKind,
        #[structopt(parse(from_os_str))]
        record: PathBuf,
    },

    /// List the converged increments of a solver message file
    Increments {
        #[structopt(parse(from_os_str))]
        transcript: PathBuf,
    },

    /// Reduce a history-output table to effective force and displacement
    History {
        #[structopt(parse(from_os_str))]
        table: PathBuf,
        /// Specimen width the unit-width forces are scaled to
        #[structopt(long)]
        width: f64,
    },

    /// Run the analytical model over every record of <job-dir>/Database.json
    Analyze {
        #[structopt(parse(from_os_str))]
        job_dir: PathBuf,
        specimen: SpecimenKind,
        /// Reconstruct R-curves instead of predicting reaction forces
        #[structopt(long)]
        r_curve: bool,
    },

    /// Post-process every point of a design of experiments
    Sweep {
        #[structopt(parse(from_os_str))]
        root: PathBuf,
        #[structopt(parse(from_os_str))]
        design: PathBuf,
        specimen: SpecimenKind,
    },
}

fn read_record(path: &Path) -> Result<Record> {
    read_first_record(path)
        .with_context(|| format!("reading {}", path.display()))?
        .ok_or_else(|| anyhow!("{} holds no record", path.display()))
}

fn print_record(record: Record) -> Result<()> {
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}

/// History table `<JobID>.csv` of the point, then the analytical force for
/// its displacement.
fn post_process(kind: SpecimenKind, point: &Path, record: &Record) -> czm_io::Result<Record> {
    let parameters = SpecimenParameters::from_record(record)?;
    let table = HistoryOutput::from_file(point.join(format!("{}.csv", parameters.job_id)))?;
    let mut output: Record = table.load_displacement(parameters.width)?.into();

    let mut merged = record.clone();
    merge(&mut merged, output.clone());
    let mut specimen = Specimen::new(kind)?;
    merge(&mut output, specimen.reaction_force_from_record(&merged)?.into());
    Ok(output)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::ReactionForce { specimen, record } => {
            let record = read_record(&record)?;
            let mut model = Specimen::new(specimen)?;
            print_record(model.reaction_force_from_record(&record)?.into())
        }
        Command::RCurve { specimen, record } => {
            let record = read_record(&record)?;
            let mut model = Specimen::new(specimen)?;
            print_record(model.r_curve_from_record(&record)?.into())
        }
        Command::Increments { transcript } => {
            let record = find_converged_increments(&transcript)
                .with_context(|| format!("reading {}", transcript.display()))?;
            println!("{:>10} {:>10} {:>10}", "time", "first", "last");
            for (time, first, last) in record.iter() {
                println!("{time:>10.4} {first:>10} {last:>10}");
            }
            Ok(())
        }
        Command::History { table, width } => {
            let history = HistoryOutput::from_file(&table)
                .with_context(|| format!("reading {}", table.display()))?;
            print_record(history.load_displacement(width)?.into())
        }
        Command::Analyze {
            job_dir,
            specimen,
            r_curve,
        } => {
            let database = ExperimentDatabase::new(&job_dir);
            let records = database.run_analysis(|record| {
                let mut model = Specimen::new(specimen)?;
                let output: Record = if r_curve {
                    model.r_curve_from_record(record)?.into()
                } else {
                    model.reaction_force_from_record(record)?.into()
                };
                Ok(output)
            })?;
            log::info!(
                "{} records of {} analysed as {specimen}",
                records.len(),
                database.path().display()
            );
            Ok(())
        }
        Command::Sweep {
            root,
            design,
            specimen,
        } => {
            let design = DesignOfExperiments::from_file(&design)
                .with_context(|| format!("reading {}", design.display()))?;
            let records = run_post_processing(&root, &design, |point, record| {
                post_process(specimen, point, record)
            })?;
            log::info!("{} points post-processed", records.len());
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Command::from_args())
}
