//! Run orchestration for the glyphmint binary.
//!
//! Each command loads the configuration, applies CLI overrides, builds the
//! coverage index and then hands off to the render crate.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use glyphmint_config::{Config, WorkerMode, format_code_point, parse_code_list, parse_code_point};
use glyphmint_fonts::{CoverageIndex, GlyphSource, collect_font_paths, validate};
use glyphmint_render::{
    IndexProvider, RenderEngine, RenderParams, RenderSummary, render_glyph, write_atomic,
    write_missing_report,
};

use crate::cli::{Cli, Commands, RenderArgs};
use crate::debug;
use crate::error::AppError;

/// Sampled errors printed after a render run.
pub const PRINTED_ERROR_LIMIT: usize = 10;

/// Execute the parsed command line.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    debug::apply_config_level(config.log_level);

    match &cli.command {
        Commands::Render(args) => {
            args.apply(&mut config);
            config.validate()?;
            run_render(&config, args)
        }
        Commands::Glyph {
            code,
            out_file,
            fonts,
            canvas,
        } => {
            fonts.apply(&mut config);
            canvas.apply(&mut config);
            config.validate()?;
            run_glyph(&config, code, out_file.as_deref())
        }
        Commands::Check { codes, fonts } => {
            fonts.apply(&mut config);
            run_check(&config, codes)
        }
    }
}

/// Resolve the configured font inputs into ordered paths.
fn font_paths(config: &Config) -> Result<Vec<PathBuf>, AppError> {
    let paths = collect_font_paths(&config.fonts.dirs, &config.fonts.paths);
    if paths.is_empty() {
        return Err(AppError::Configuration(format!(
            "no font files found (dirs: {:?}, paths: {:?})",
            config.fonts.dirs, config.fonts.paths
        )));
    }
    Ok(paths)
}

fn load_index(paths: &[PathBuf]) -> Result<CoverageIndex, AppError> {
    let index = CoverageIndex::load(paths);
    if index.is_empty() {
        return Err(AppError::Configuration(format!(
            "none of the {} font file(s) could be loaded",
            paths.len()
        )));
    }
    Ok(index)
}

fn requested_code_points(config: &Config, codes: Option<&str>) -> Result<Vec<u32>, AppError> {
    match codes {
        Some(list) => Ok(parse_code_list(list)?),
        None => Ok(config.range_code_points()),
    }
}

fn run_render(config: &Config, args: &RenderArgs) -> Result<(), AppError> {
    let paths = font_paths(config)?;
    let index = load_index(&paths)?;
    let requested = requested_code_points(config, args.codes.as_deref())?;

    let coverage = validate(&requested, &index);
    coverage.enforce(config.allow_missing)?;

    if config.allow_missing && !coverage.missing.is_empty() {
        fs::create_dir_all(&config.output_dir).map_err(|source| AppError::Io {
            path: config.output_dir.clone(),
            source,
        })?;
        let report = write_missing_report(&config.output_dir, &coverage.missing)?;
        log::warn!(
            "{} code point(s) not covered, listed in {}",
            coverage.missing.len(),
            report.display()
        );
    }

    let provider = match config.worker_mode {
        WorkerMode::Isolated => {
            drop(index);
            IndexProvider::per_worker(move || CoverageIndex::load(&paths))
        }
        WorkerMode::Shared => IndexProvider::shared(index),
    };

    let summary = RenderEngine::new(
        provider,
        RenderParams::from_config(config),
        &config.output_dir,
    )
    .with_workers(config.resolved_workers())
    .with_progress(|p| {
        log::info!(
            "Progress: {}/{} shard(s), {}/{} code point(s)",
            p.shards_done,
            p.shards_total,
            p.processed,
            p.requested
        );
    })
    .run(&coverage.accepted)?;

    print_summary(&summary, coverage.missing.len());

    if let Some(ref path) = args.summary {
        write_summary(path, &summary)?;
    }

    if summary.is_success() {
        Ok(())
    } else {
        Err(AppError::RenderFailures {
            failed: summary.failed,
            requested: summary.requested,
        })
    }
}

fn print_summary(summary: &RenderSummary, skipped: usize) {
    println!(
        "Rendered {} of {} glyph(s), {} failed, {} skipped as missing",
        summary.written, summary.requested, summary.failed, skipped
    );
    if summary.errors.is_empty() {
        return;
    }
    println!("Sample errors:");
    for message in summary.errors.iter().take(PRINTED_ERROR_LIMIT) {
        println!("  {message}");
    }
    if summary.errors.len() > PRINTED_ERROR_LIMIT {
        println!("  ... {} more", summary.errors.len() - PRINTED_ERROR_LIMIT);
    }
}

fn write_summary(path: &Path, summary: &RenderSummary) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| AppError::Configuration(format!("cannot serialize summary: {e}")))?;
    fs::write(path, json).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run_glyph(config: &Config, code: &str, out_file: Option<&Path>) -> Result<(), AppError> {
    let code_point = parse_code_point(code)?;
    let paths = font_paths(config)?;
    let index = load_index(&paths)?;
    render_single(&index, code_point, &RenderParams::from_config(config), out_file)
}

/// Render one code point to `out_file`, or to stdout when none is given.
fn render_single<S: GlyphSource>(
    index: &CoverageIndex<S>,
    code_point: u32,
    params: &RenderParams,
    out_file: Option<&Path>,
) -> Result<(), AppError> {
    let svg = render_glyph(index, code_point, params)?;
    match out_file {
        Some(path) => write_atomic(path, svg.as_bytes())?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(svg.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .map_err(|source| AppError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }
    Ok(())
}

fn run_check(config: &Config, codes: &str) -> Result<(), AppError> {
    let code_points = parse_code_list(codes)?;
    let paths = font_paths(config)?;
    let index = load_index(&paths)?;

    for line in coverage_lines(&index, &code_points) {
        println!("{line}");
    }
    Ok(())
}

/// One `U+XXXX <label>` line per code point, `MISSING` when uncovered.
pub fn coverage_lines<S: GlyphSource>(index: &CoverageIndex<S>, code_points: &[u32]) -> Vec<String> {
    code_points
        .iter()
        .map(|&cp| {
            let owner = index
                .select(cp)
                .map_or_else(|| "MISSING".to_string(), |source| source.label());
            format!("{} {owner}", format_code_point(cp))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmint_fonts::testing::FixedSource;

    #[test]
    fn test_coverage_lines_report_first_match() {
        let index = CoverageIndex::from_sources(vec![
            FixedSource::square("FontA", &[0x4E00]),
            FixedSource::square("FontB", &[0x4E00, 0x4E01]),
        ]);
        assert_eq!(
            coverage_lines(&index, &[0x4E00, 0x4E01, 0x4E02]),
            vec!["U+4E00 FontA", "U+4E01 FontB", "U+4E02 MISSING"]
        );
    }

    #[test]
    fn test_single_glyph_failure_reports_cause() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out_file = tmp.path().join("4E00.svg");
        let index = CoverageIndex::from_sources(vec![
            FixedSource::square("BrokenFont", &[]).with_failure(0x4E00, "bad glyf data"),
        ]);

        let err = render_single(&index, 0x4E00, &RenderParams::default(), Some(&out_file))
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
        let message = err.to_string();
        assert!(message.contains("BrokenFont"), "{message}");
        assert!(message.contains("bad glyf data"), "{message}");
        assert!(!out_file.exists());
    }

    #[test]
    fn test_single_glyph_writes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out_file = tmp.path().join("4E00.svg");
        let index = CoverageIndex::from_sources(vec![FixedSource::square("F", &[0x4E00])]);

        render_single(&index, 0x4E00, &RenderParams::default(), Some(&out_file)).unwrap();
        assert!(std::fs::read_to_string(&out_file).unwrap().starts_with("<svg"));
    }

    #[test]
    fn test_requested_defaults_to_ranges() {
        let config = Config::default();
        let all = requested_code_points(&config, None).unwrap();
        assert_eq!(all.first(), Some(&0x2E80));
        assert!(all.contains(&0x9FFF));

        let listed = requested_code_points(&config, Some("4E00,U+4E01")).unwrap();
        assert_eq!(listed, vec![0x4E00, 0x4E01]);
    }

    #[test]
    fn test_missing_fonts_is_configuration_error() {
        let config = Config::default().with_font_dirs(vec![PathBuf::from("/nonexistent/fonts")]);
        let err = font_paths(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
