//! Integration tests for Churnboard

use std::fs;
use std::io::Write;
use std::path::Path;

use churnboard::view::{Callout, Chart, ACCURACY, DASHBOARD_TITLE, PRECISION, RECALL, ROC_AUC};
use churnboard::{render_once, DashboardPaths, LoadError, Surface, TerminalSurface, View};
use tempfile::TempDir;

/// Everything a view emitted, in order
#[derive(Debug, Default)]
struct Recorder {
    titles: Vec<String>,
    headers: Vec<String>,
    metrics: Vec<(String, String)>,
    charts: Vec<Chart>,
    callouts: Vec<(Callout, String)>,
    markdown: usize,
    events: usize,
}

impl Surface for Recorder {
    fn title(&mut self, text: &str) -> churnboard::Result<()> {
        self.titles.push(text.to_string());
        self.events += 1;
        Ok(())
    }

    fn header(&mut self, text: &str) -> churnboard::Result<()> {
        self.headers.push(text.to_string());
        self.events += 1;
        Ok(())
    }

    fn subheader(&mut self, _text: &str) -> churnboard::Result<()> {
        self.events += 1;
        Ok(())
    }

    fn markdown(&mut self, _text: &str) -> churnboard::Result<()> {
        self.markdown += 1;
        self.events += 1;
        Ok(())
    }

    fn metric(&mut self, label: &str, value: &str) -> churnboard::Result<()> {
        self.metrics.push((label.to_string(), value.to_string()));
        self.events += 1;
        Ok(())
    }

    fn callout(&mut self, kind: Callout, text: &str) -> churnboard::Result<()> {
        self.callouts.push((kind, text.to_string()));
        self.events += 1;
        Ok(())
    }

    fn divider(&mut self) -> churnboard::Result<()> {
        self.events += 1;
        Ok(())
    }

    fn chart(&mut self, chart: &Chart) -> churnboard::Result<()> {
        self.charts.push(chart.clone());
        self.events += 1;
        Ok(())
    }
}

const HEADER: &str = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,PhoneService,\
InternetService,Contract,PaperlessBilling,PaymentMethod,MonthlyCharges,TotalCharges,Churn";

/// Write a dataset plus both artifacts into a fresh directory
fn create_workspace(rows: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), rows);
    fs::write(dir.path().join("modelo_final.pkl"), [0x80u8, 0x04, 0x95, 0x2e]).unwrap();
    fs::write(dir.path().join("scaler_final.pkl"), [0x80u8, 0x04, 0x95, 0x2e]).unwrap();
    dir
}

fn write_dataset(dir: &Path, rows: &[&str]) {
    let mut file = fs::File::create(dir.join("WA_Fn-UseC_-Telco-Customer-Churn.csv")).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
}

fn telco_rows() -> Vec<&'static str> {
    vec![
        "7590-VHVEG,Female,0,Yes,No,1,No,DSL,Month-to-month,Yes,Electronic check,29.85,29.85,No",
        "5575-GNVDE,Male,0,No,No,34,Yes,DSL,One year,No,Mailed check,56.95,1889.5,No",
        "3668-QPYBK,Male,0,No,No,2,Yes,DSL,Month-to-month,Yes,Mailed check,53.85,108.15,Yes",
        "7795-CFOCW,Male,0,No,No,45,No,DSL,One year,No,Bank transfer (automatic),42.3,1840.75,No",
        "9237-HQITU,Female,0,No,No,2,Yes,Fiber optic,Month-to-month,Yes,Electronic check,70.7,151.65,Yes",
        "4472-LVYGI,Female,0,Yes,Yes,0,No,DSL,Two year,Yes,Bank transfer (automatic),52.55, ,No",
        "9305-CDSKC,Female,0,No,No,8,Yes,Fiber optic,Month-to-month,Yes,Electronic check,99.65,820.5,Yes",
        "1452-KIOVK,Male,0,No,Yes,22,Yes,Fiber optic,Month-to-month,Yes,Credit card (automatic),89.1,1949.4,No",
        "3115-CZMZD,Male,0,No,Yes,0,Yes,No,Two year,No,Mailed check,20.25, ,No",
        "6713-OKOMC,Female,0,No,No,10,No,DSL,Month-to-month,No,Mailed check,29.75,301.9,No",
    ]
}

#[test]
fn test_eda_renders_one_metric_and_three_charts() {
    let dir = create_workspace(&telco_rows());
    let mut recorder = Recorder::default();

    render_once(&DashboardPaths::in_dir(dir.path()), View::Eda, &mut recorder).unwrap();

    assert_eq!(recorder.metrics.len(), 1);
    assert_eq!(recorder.charts.len(), 3);
    assert_eq!(recorder.markdown, 3);
    assert!(recorder.callouts.is_empty());

    // 8 cleaned rows, 3 churned
    let (label, value) = &recorder.metrics[0];
    assert_eq!(label, "Overall Churn Rate");
    assert_eq!(value, "37.50 %");
}

#[test]
fn test_every_view_starts_with_dashboard_title() {
    let dir = create_workspace(&telco_rows());

    for view in View::ALL {
        let mut recorder = Recorder::default();
        render_once(&DashboardPaths::in_dir(dir.path()), view, &mut recorder).unwrap();
        assert_eq!(recorder.titles, vec![DASHBOARD_TITLE.to_string()]);
    }

    let mut surface = TerminalSurface::new(Vec::new(), None);
    render_once(&DashboardPaths::in_dir(dir.path()), View::Evaluation, &mut surface).unwrap();
    let text = String::from_utf8(surface.into_inner()).unwrap();
    let title_at = text.find(DASHBOARD_TITLE).unwrap();
    let header_at = text.find("Logistic Regression Performance Metrics").unwrap();
    assert!(title_at < header_at);
}

#[test]
fn test_uncoercible_rows_absent_from_every_chart() {
    let dir = create_workspace(&telco_rows());
    let mut recorder = Recorder::default();

    render_once(&DashboardPaths::in_dir(dir.path()), View::Eda, &mut recorder).unwrap();

    for chart in &recorder.charts {
        match chart {
            Chart::GroupedCount { counts, .. } => {
                assert_eq!(counts.total(), 8);
                assert!(!counts.categories.iter().any(|c| c == "Two year" || c == "No"));
            }
            Chart::StackedHistogram { histogram, .. } => {
                assert_eq!(histogram.total(), 8);
                assert_eq!(histogram.bins(), 30);
                // both dropped rows had zero tenure
                assert_eq!(histogram.edges[0], 1.0);
            }
        }
    }
}

#[test]
fn test_evaluation_renders_constant_metrics_without_charts() {
    let dir = create_workspace(&telco_rows());
    let mut recorder = Recorder::default();

    render_once(&DashboardPaths::in_dir(dir.path()), View::Evaluation, &mut recorder).unwrap();

    let values: Vec<&str> = recorder.metrics.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec![ACCURACY, PRECISION, RECALL, ROC_AUC]);
    assert!(recorder.charts.is_empty());

    let narratives: Vec<&String> = recorder
        .callouts
        .iter()
        .filter(|(kind, _)| *kind == Callout::Success)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(narratives.len(), 1);
    assert!(narratives[0].contains("SMOTE"));
}

#[test]
fn test_evaluation_metrics_ignore_dataset_contents() {
    let full = create_workspace(&telco_rows());
    let tiny = create_workspace(&[
        "0001-AAAAA,Male,1,No,No,70,Yes,Fiber optic,Two year,No,Mailed check,110.0,7700.0,Yes",
    ]);

    let mut first = Recorder::default();
    let mut second = Recorder::default();
    render_once(&DashboardPaths::in_dir(full.path()), View::Evaluation, &mut first).unwrap();
    render_once(&DashboardPaths::in_dir(tiny.path()), View::Evaluation, &mut second).unwrap();

    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.callouts, second.callouts);
}

#[test]
fn test_missing_artifacts_halt_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), &telco_rows());

    for view in View::ALL {
        let mut recorder = Recorder::default();
        let err = render_once(&DashboardPaths::in_dir(dir.path()), view, &mut recorder).unwrap_err();

        assert!(matches!(err.downcast_ref::<LoadError>(), Some(LoadError::MissingFile { .. })));
        assert!(err.to_string().contains("modelo_final.pkl"));
        assert_eq!(recorder.events, 0);
    }

    // model present, scaler still missing
    fs::write(dir.path().join("modelo_final.pkl"), b"model").unwrap();
    let mut recorder = Recorder::default();
    let err = render_once(&DashboardPaths::in_dir(dir.path()), View::Eda, &mut recorder).unwrap_err();
    assert!(err.to_string().contains("scaler_final.pkl"));
    assert_eq!(recorder.events, 0);
}

#[test]
fn test_missing_dataset_halts_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("modelo_final.pkl"), b"model").unwrap();
    fs::write(dir.path().join("scaler_final.pkl"), b"scaler").unwrap();

    let mut recorder = Recorder::default();
    let err = render_once(&DashboardPaths::in_dir(dir.path()), View::Eda, &mut recorder).unwrap_err();

    assert_eq!(
        err.to_string(),
        "data file ('WA_Fn-UseC_-Telco-Customer-Churn.csv') not found."
    );
    assert_eq!(recorder.events, 0);
}

#[test]
fn test_terminal_surface_saves_svg_charts() {
    let dir = create_workspace(&telco_rows());
    let chart_dir = dir.path().join("charts");
    let mut surface = TerminalSurface::new(Vec::new(), Some(chart_dir.clone()));

    render_once(&DashboardPaths::in_dir(dir.path()), View::Eda, &mut surface).unwrap();

    assert_eq!(surface.saved_charts.len(), 3);
    for path in &surface.saved_charts {
        assert!(path.starts_with(&chart_dir));
        assert!(path.exists());
    }

    let text = String::from_utf8(surface.into_inner()).unwrap();
    assert!(text.contains("Overall Churn Rate"));
    assert!(text.contains("37.50 %"));
}
