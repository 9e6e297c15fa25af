//! Report rendering tests
//!
//! Snapshot tests use insta to capture the rendered report.
//! Run `cargo insta review` to review and accept snapshot changes.

use helm_whatup::report::render;
use helm_whatup::{ChartVersionInfo, OutputFormat};
use insta::assert_snapshot;

fn sample_results() -> Vec<ChartVersionInfo> {
    vec![
        ChartVersionInfo::new("coredns", "coredns", "1.5.0", "1.7.1"),
        ChartVersionInfo::new("hunter", "karma", "1.1.5", "1.1.5"),
        ChartVersionInfo::new("jenkins", "jenkins", "0.32.1", "1.9.4"),
    ]
}

fn render_to_string(results: &[ChartVersionInfo], format: OutputFormat) -> String {
    let mut out = Vec::new();
    render(results, format, &mut out).expect("render report");
    String::from_utf8(out).expect("utf-8 report")
}

#[test]
fn test_plain_report_snapshot() {
    let output = render_to_string(&sample_results(), OutputFormat::Plain);
    assert_snapshot!(output, @r###"
    There is an update available for release coredns (coredns)!
    Installed version: 1.5.0
    Available version: 1.7.1
    Release hunter (1.1.5) is up to date.
    There is an update available for release jenkins (jenkins)!
    Installed version: 0.32.1
    Available version: 1.9.4
    Done.
    "###);
}

#[test]
fn test_yaml_report_snapshot() {
    let output = render_to_string(&sample_results()[..2], OutputFormat::Yaml);
    assert_snapshot!(output, @r###"
    - releaseName: coredns
      chartName: coredns
      installedVersion: 1.5.0
      latestVersion: 1.7.1
      status: OUTDATED
    - releaseName: hunter
      chartName: karma
      installedVersion: 1.1.5
      latestVersion: 1.1.5
      status: UPTODATE
    "###);
}

#[test]
fn test_json_round_trip() {
    let results = sample_results();
    let output = render_to_string(&results, OutputFormat::Json);

    let decoded: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(decoded.len(), results.len());

    for (object, info) in decoded.iter().zip(&results) {
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "chartName",
                "installedVersion",
                "latestVersion",
                "releaseName",
                "status"
            ]
        );
        assert_eq!(object["releaseName"], info.release_name());
        assert_eq!(object["chartName"], info.chart_name());
        assert_eq!(object["installedVersion"], info.installed_version());
        assert_eq!(object["latestVersion"], info.latest_version());
        assert_eq!(object["status"], info.status().as_str());
    }
}

#[test]
fn test_table_lists_only_outdated_releases() {
    let output = render_to_string(&sample_results(), OutputFormat::Table);
    let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();

    // Header plus one row per outdated release
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("RELEASE"));
    assert!(lines[0].contains("AVAILABLE VERSION"));
    assert!(lines[1].contains("coredns") && lines[1].contains("1.7.1"));
    assert!(lines[2].contains("jenkins") && lines[2].contains("1.9.4"));
    assert!(!output.contains("hunter"));
}

#[test]
fn test_table_with_everything_up_to_date() {
    let results = vec![ChartVersionInfo::new("hunter", "karma", "1.1.5", "1.1.5")];
    let output = render_to_string(&results, OutputFormat::Table);

    assert!(output.contains("RELEASE"));
    assert!(!output.contains("hunter"));
}
