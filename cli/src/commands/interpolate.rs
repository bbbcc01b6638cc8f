use anyhow::Result;
use laupop::{Country, Settings};
use tracing::info;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InterpolateArgs) -> Result<()> {
    let mut settings = Settings::from_env();
    if let Some(path) = &args.data_path { settings = settings.with_data_path(path) }
    if let Some(path) = &args.graph_path { settings = settings.with_graph_path(path) }
    settings.schema.admin.id = args.admin_id_field.clone();
    settings.schema.grid.id = args.grid_id_field.clone();
    settings.schema.grid.population = args.population_field.clone();

    info!("[interpolate] loading {} from {}", args.country, settings.data_path.display());
    let mut country = Country::new(&args.country, &settings)?;

    let report = country.compute_population_per_unit()?;
    eprintln!(
        "[interpolate] {} intersections, assigned {:.0} of {:.0} people",
        report.intersections, report.assigned_population, report.grid_population,
    );

    if let Some(path) = &args.units_csv {
        country.admin().write_populations_csv(path)?;
        eprintln!("[interpolate] wrote unit populations to {}", path.display());
    }

    // With --plot alone the SVG takes stdout, so the summary moves to stderr.
    let svg_to_stdout = args.plot && !args.save;
    let summary = country.get_urbanization_summary(args.plot)?;
    let text = if args.json { format!("{}\n", summary.to_json()?) } else { summary.to_string() };
    if svg_to_stdout { eprint!("{text}") } else { print!("{text}") }

    if let Some(path) = &args.summary_csv {
        summary.write_to_csv(path)?;
        eprintln!("[interpolate] wrote summary to {}", path.display());
    }

    if args.save {
        let chart = country.print_urbanization_summary(true)?;
        if let Some(path) = &chart.path {
            eprintln!("[interpolate] wrote chart to {}", path.display());
        }
    } else if let Some(chart) = country.last_chart() {
        print!("{}", chart.svg);
    }

    Ok(())
}
