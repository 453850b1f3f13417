use crate::agents::project_scanner::ProjectInfo;
use crate::agents::{
    Advisory, AdvisoryReport, Evaluation, ProjectScannerAgent, SilentPrompt, SystemBrowser,
    TerminalPrompt, UpgradeAdvisor, WatchedPackage,
};
use crate::error::{AdvisorError, Result};
use crate::pubspec::{DeclaredConstraint, DependencySet, Pubspec, PubspecEditor, PubspecFile};
use crate::registry::PubDevClient;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Execute the analyze workflow: report outdated packages and ask what to do with each
pub fn execute_analyze<P: AsRef<Path>>(
    project_path: P,
    hosted_url: Option<&str>,
    update_all: bool,
) -> Result<()> {
    println!("{}", "Analyzing watched packages...".cyan().bold());

    // Step 1: Validate project structure
    let project_info = validate_project(project_path.as_ref())?;

    // Step 2: Fetch latest versions and compare
    let (advisor, client_url) = build_advisor(&project_info, hosted_url)?;
    println!(
        "\n{}",
        format!("2. Fetching latest versions from {}...", client_url).yellow()
    );
    let evaluation = with_spinner("Checking pub.dev", || advisor.evaluate());
    println!("{}", "✓ Check completed".green());
    print_unresolved(&evaluation);

    if evaluation.advisories.is_empty() {
        println!(
            "\n{}",
            "✨ All watched packages are up to date!".green().bold()
        );
        return Ok(());
    }

    // Step 3: Ask about each advisory
    println!(
        "\n{}",
        format!(
            "3. Reviewing {} outdated package(s)...",
            evaluation.advisories.len()
        )
        .yellow()
    );
    let mut prompt = TerminalPrompt::stdio(update_all);
    let report = advisor.resolve_all(&evaluation.advisories, &mut prompt);

    // Step 4: Display summary
    print_report(&report);

    if !report.failed.is_empty() {
        return Err(AdvisorError::UpdatesFailed(report.failed.len()));
    }

    println!("\n{}", "✨ Analysis completed successfully!".green().bold());
    Ok(())
}

/// Execute the check workflow (dry-run): advisories are printed, nothing is prompted or written
pub fn execute_check<P: AsRef<Path>>(project_path: P, hosted_url: Option<&str>) -> Result<()> {
    println!("{}", "Checking watched packages...".cyan().bold());

    let project_info = validate_project(project_path.as_ref())?;

    let (advisor, client_url) = build_advisor(&project_info, hosted_url)?;
    println!(
        "\n{}",
        format!("2. Fetching latest versions from {}...", client_url).yellow()
    );
    let (evaluation, _) =
        with_spinner("Checking pub.dev", || advisor.analyze(&mut SilentPrompt));
    println!("{}", "✓ Check completed".green());
    print_unresolved(&evaluation);

    print_advisories(&evaluation.advisories);
    Ok(())
}

/// Execute the list workflow - display every watched package
pub fn execute_list<P: AsRef<Path>>(project_path: P, hosted_url: Option<&str>) -> Result<()> {
    println!("{}", "Listing watched packages...".cyan().bold());

    let project_info = validate_project(project_path.as_ref())?;

    let (advisor, client_url) = build_advisor(&project_info, hosted_url)?;
    println!(
        "\n{}",
        format!("2. Fetching latest versions from {}...", client_url).yellow()
    );
    let evaluation = with_spinner("Checking pub.dev", || advisor.evaluate());
    println!("{}", "✓ Versions loaded".green());

    println!("\n{}", list_heading(&evaluation.pubspec).cyan().bold());
    print_table(
        &evaluation.runtime,
        &evaluation.pubspec.dependencies,
        &evaluation.advisories,
    );
    print_table(
        &evaluation.dev,
        &evaluation.pubspec.dev_dependencies,
        &evaluation.advisories,
    );

    Ok(())
}

fn validate_project(project_path: &Path) -> Result<ProjectInfo> {
    println!("\n{}", "1. Validating project structure...".yellow());
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate()?;
    println!(
        "{}",
        format!(
            "✓ Found pubspec.yaml in {}",
            project_info.project_path.display()
        )
        .green()
    );
    Ok(project_info)
}

fn build_advisor(
    project_info: &ProjectInfo,
    hosted_url: Option<&str>,
) -> Result<(UpgradeAdvisor, String)> {
    let client = match hosted_url {
        Some(url) if !url.trim().is_empty() => PubDevClient::with_hosted_url(url)?,
        _ => PubDevClient::new()?,
    };
    let client_url = client.hosted_url().trim_end_matches('/').to_string();

    let advisor = UpgradeAdvisor::new(
        Arc::new(client),
        Arc::new(PubspecFile::new(&project_info.pubspec_path)),
        Arc::new(PubspecEditor::new(&project_info.pubspec_path)),
        Arc::new(SystemBrowser),
    );
    Ok((advisor, client_url))
}

fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = work();

    pb.finish_and_clear();
    result
}

/// Declared watched packages whose latest version could not be fetched.
fn print_unresolved(evaluation: &Evaluation) {
    let unresolved: Vec<&str> = evaluation
        .runtime
        .iter()
        .filter(|package| evaluation.pubspec.dependencies.contains(&package.name))
        .chain(
            evaluation
                .dev
                .iter()
                .filter(|package| evaluation.pubspec.dev_dependencies.contains(&package.name)),
        )
        .filter(|package| package.required_version.is_empty())
        .map(|package| package.name.as_str())
        .collect();

    if !unresolved.is_empty() {
        println!(
            "{}",
            format!(
                "⚠ Could not fetch the latest version of: {} (skipped)",
                unresolved.join(", ")
            )
            .red()
        );
    }
}

fn print_advisories(advisories: &[Advisory]) {
    if advisories.is_empty() {
        println!(
            "\n{}",
            "✨ All watched packages are up to date!".green().bold()
        );
        return;
    }

    println!("\n{}", "📦 Outdated packages:".cyan().bold());
    println!(
        "{}",
        format!("Found {} outdated package(s)", advisories.len()).yellow()
    );
    for advisory in advisories {
        println!(
            "  • {} {} → {}",
            advisory.package_name.white().bold(),
            advisory.declared_constraint.red(),
            format!("^{}", advisory.required_version).green().bold()
        );
    }

    println!("\n{}", "To review these packages, run:".dimmed());
    println!("  {}", "pub-advisor analyze".cyan());
}

fn list_heading(pubspec: &Pubspec) -> String {
    match pubspec.name.as_deref() {
        Some(name) if !name.is_empty() => format!("📦 Watched packages in {}:", name),
        _ => "📦 Watched packages:".to_string(),
    }
}

fn print_table(packages: &[WatchedPackage], declared: &DependencySet, advisories: &[Advisory]) {
    let section = declared.section();
    println!("\n{}:", section.key().yellow().bold());
    if declared.is_empty() {
        println!(
            "{}",
            format!("   (pubspec.yaml declares no {})", section.key()).dimmed()
        );
    }

    for package in packages {
        let constraint = match declared.get(&package.name) {
            Some(DeclaredConstraint::Text(text)) => text.normal(),
            Some(DeclaredConstraint::Null) => "(no constraint)".dimmed(),
            Some(DeclaredConstraint::Opaque) => "(non-hosted source)".dimmed(),
            None => "not declared".dimmed(),
        };
        let latest = if package.required_version.is_empty() {
            "unknown".dimmed()
        } else {
            package.required_version.green()
        };
        let outdated = advisories.iter().any(|advisory| {
            advisory.section == section && advisory.package_name == package.name
        });
        let marker = if outdated {
            " (outdated)".red()
        } else {
            "".normal()
        };

        println!(
            "  • {} {} latest {}{}",
            package.name.white().bold(),
            constraint,
            latest,
            marker
        );
    }
}

fn print_report(report: &AdvisoryReport) {
    println!("\n{}", "📝 Summary:".cyan().bold());
    println!(
        "{}",
        format!("Reviewed {} advisory(ies)", report.total()).yellow()
    );

    if !report.updated.is_empty() {
        println!("\n{}:", "Updated".green().bold());
        for (name, old, new) in &report.updated {
            println!(
                "  • {} {} → {}",
                name.white().bold(),
                old.red(),
                new.green().bold()
            );
        }
    }

    if !report.actions.is_empty() {
        println!("\n{}:", "Opened".cyan().bold());
        for (name, action) in &report.actions {
            println!("  • {} {}", name.white().bold(), action.to_string().dimmed());
        }
    }

    if !report.dismissed.is_empty() {
        println!("\n{}:", "Dismissed".dimmed());
        for name in &report.dismissed {
            println!("  • {}", name.dimmed());
        }
    }

    if !report.failed.is_empty() {
        println!("\n{}:", "Failed".red().bold());
        for (name, error) in &report.failed {
            println!("  • {} {}", name.white().bold(), error.red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubspec::parser::PubspecParser;

    #[test]
    fn list_heading_names_the_package() {
        let pubspec = PubspecParser::parse("name: counter\n").unwrap();
        assert_eq!(list_heading(&pubspec), "📦 Watched packages in counter:");
    }

    #[test]
    fn list_heading_without_name() {
        let pubspec = PubspecParser::parse("dependencies:\n  bloc: ^8.0.0\n").unwrap();
        assert_eq!(list_heading(&pubspec), "📦 Watched packages:");
    }
}
