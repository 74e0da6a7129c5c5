//! Menu views and the dispatcher that renders them onto a surface

use std::fmt;

use crate::dashboard::Bootstrap;
use crate::data::{GroupedCounts, StackedHistogram, CONTRACT, INTERNET_SERVICE, TENURE};

/// Page title shown above whichever view is selected
pub const DASHBOARD_TITLE: &str = "Customer Churn Dashboard";

/// Number of equal-width bins in the tenure histogram
pub const TENURE_BINS: usize = 30;

/// Scores of the SMOTE-balanced logistic regression, measured offline
pub const ACCURACY: &str = "74.5%";
pub const PRECISION: &str = "51.4%";
pub const RECALL: &str = "73.3%";
pub const ROC_AUC: &str = "0.821";

/// Entries of the sidebar menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    /// Exploratory charts and the overall churn rate
    Eda,
    /// Offline evaluation scores of the churn model
    Evaluation,
}

impl View {
    pub const ALL: [View; 2] = [View::Eda, View::Evaluation];

    pub fn label(self) -> &'static str {
        match self {
            View::Eda => "1. EDA & Key Metric",
            View::Evaluation => "3. Model Evaluation",
        }
    }

    /// Resolve a menu answer: the label itself or its leading number
    pub fn from_choice(choice: &str) -> Option<View> {
        let choice = choice.trim();
        View::ALL.into_iter().find(|view| {
            let label = view.label();
            choice.eq_ignore_ascii_case(label)
                || label
                    .split_once('.')
                    .is_some_and(|(number, _)| number == choice)
        })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chart payloads handed to a surface
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// Bar per (category, churn label) pair
    GroupedCount { title: String, counts: GroupedCounts },
    /// Histogram bars stacked by churn label
    StackedHistogram {
        title: String,
        x_label: String,
        histogram: StackedHistogram,
    },
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::GroupedCount { title, .. } | Chart::StackedHistogram { title, .. } => title,
        }
    }
}

/// Tone of a highlighted text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callout {
    Info,
    Success,
}

/// Output primitives a view is made of
pub trait Surface {
    fn title(&mut self, text: &str) -> crate::Result<()>;
    fn header(&mut self, text: &str) -> crate::Result<()>;
    fn subheader(&mut self, text: &str) -> crate::Result<()>;
    fn markdown(&mut self, text: &str) -> crate::Result<()>;
    fn metric(&mut self, label: &str, value: &str) -> crate::Result<()>;
    fn callout(&mut self, kind: Callout, text: &str) -> crate::Result<()>;
    fn divider(&mut self) -> crate::Result<()>;
    fn chart(&mut self, chart: &Chart) -> crate::Result<()>;
}

/// Render the selected view.
///
/// Nothing is drawn unless bootstrap already succeeded, since a `Bootstrap`
/// only exists once every startup file loaded.
pub fn render<S: Surface + ?Sized>(view: View, boot: &Bootstrap, surface: &mut S) -> crate::Result<()> {
    tracing::debug!(view = %view, "rendering view");
    surface.title(DASHBOARD_TITLE)?;
    match view {
        View::Eda => render_eda(boot, surface),
        View::Evaluation => render_evaluation(surface),
    }
}

fn render_eda<S: Surface + ?Sized>(boot: &Bootstrap, surface: &mut S) -> crate::Result<()> {
    let data = &boot.data;
    surface.header("Exploratory Analysis and Churn Drivers")?;

    let churn_rate = data.churn_rate()?;
    surface.metric("Overall Churn Rate", &format_rate(churn_rate))?;

    surface.subheader("Churn by Contract Type")?;
    surface.markdown(CONTRACT_NOTES)?;
    surface.chart(&Chart::GroupedCount {
        title: "Churn Distribution by Contract".to_string(),
        counts: data.grouped_counts(CONTRACT)?,
    })?;

    surface.subheader("Churn by Internet Service")?;
    surface.markdown(INTERNET_NOTES)?;
    surface.chart(&Chart::GroupedCount {
        title: "Impact of Internet Service on Churn".to_string(),
        counts: data.grouped_counts(INTERNET_SERVICE)?,
    })?;

    surface.subheader("Churn Distribution by Tenure")?;
    surface.markdown(TENURE_NOTES)?;
    surface.chart(&Chart::StackedHistogram {
        title: "Tenure Distribution by Churn".to_string(),
        x_label: "Customer tenure (months)".to_string(),
        histogram: data.stacked_histogram(TENURE, TENURE_BINS)?,
    })?;

    Ok(())
}

fn render_evaluation<S: Surface + ?Sized>(surface: &mut S) -> crate::Result<()> {
    surface.header("Logistic Regression Performance Metrics")?;

    surface.metric("Accuracy (overall)", ACCURACY)?;
    surface.metric("Precision (churn customers)", PRECISION)?;
    surface.metric("Recall (sensitivity)", RECALL)?;
    surface.metric("ROC-AUC", ROC_AUC)?;

    surface.divider()?;

    surface.subheader("Receiver Operating Characteristic (ROC)")?;
    surface.callout(Callout::Info, &roc_summary())?;

    surface.subheader("Reading the Results")?;
    surface.callout(
        Callout::Success,
        &format!(
            "Thanks to SMOTE class balancing the model offers strong, well balanced performance. \
             SMOTE is a resampling technique used to balance classes when the training data is skewed.\n\
             \n\
             - High sensitivity ({recall}): the model catches {recall} of the customers who actually leave, \
             which keeps the risk of losing valuable customers low.\n\
             - Acceptable precision ({precision}): {precision} of the churn alerts are correct. \
             Some false alarms remain, an acceptable trade-off for a business-risk problem.\n\
             - Solid ranking ({auc}): an area under the ROC curve of {auc} confirms good separation \
             between the two classes.",
            recall = RECALL,
            precision = PRECISION,
            auc = ROC_AUC,
        ),
    )
}

/// Churn rate as shown in the metric tile
pub fn format_rate(rate: f64) -> String {
    format!("{:.2} %", rate)
}

fn roc_summary() -> String {
    let probability = ROC_AUC
        .parse::<f64>()
        .map(|auc| format!("{:.1}%", auc * 100.0))
        .unwrap_or_else(|_| ROC_AUC.to_string());
    format!(
        "The ROC-AUC is {}. There is a {} chance that the model ranks a churning customer \
         above a retained one.",
        ROC_AUC, probability
    )
}

const CONTRACT_NOTES: &str = "\
Contract type is the **strongest single predictor** of churn.

* **High risk:** month-to-month customers are by far the most volatile group. Their contractual \
freedom shows up as a churn rate **above 40%** in this segment.
* **Low risk:** one and two year contracts anchor retention, with churn rates usually below 15%.";

const INTERNET_NOTES: &str = "\
This chart is key to understanding the profitability and price sensitivity of each segment.

* **Higher risk at the top end:** churn is markedly higher among customers paying the highest \
monthly fees, usually above $80 to $100.
* **Business impact:** these customers often buy premium bundles or high-speed services such as \
fiber optic. They are the most demanding about quality and the most sensitive to competing offers; \
paying more, they expect flawless service.
* **Strategy:** retention should not only target month-to-month customers but also guarantee \
quality for this high-value segment, whose churn carries the largest potential revenue loss.";

const TENURE_NOTES: &str = "\
This histogram shows the risk lifecycle of a customer.

* **Early churn:** risk peaks in the first 6 to 12 months, so onboarding has to win the customer \
quickly.
* **Stability:** past 24 months the chance of leaving drops sharply; customers who survive the \
critical window become loyal.";
