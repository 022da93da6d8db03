//! Plain text helpers for reporting training progress and classification results.

use std::fmt;

use crate::{MlErr, Result};

/// Formats a ratio as a percentage with two decimals, `0.5` turns into `"50.00%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.)
}

/// Draws a progress bar of `width` cells followed by the percentage, like `[=====     ] 50.00%`.
///
/// `value` is clamped into `[0, 1]` when filling the bar, the percentage is printed as is.
pub fn progress_bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0., 1.) * width as f64).round() as usize).min(width);

    format!(
        "[{}{}] {}",
        "=".repeat(filled),
        " ".repeat(width - filled),
        format_percent(value)
    )
}

/// Returns the index of the largest value, the first one on ties.
pub fn arg_max(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }

    best.map(|(i, _)| i)
}

/// Plots an error series as an ASCII chart, epochs along the x axis.
///
/// # Arguments
/// * `errors` - One error per epoch.
/// * `width` - The amount of columns of the plot area, at least 20.
/// * `height` - The amount of rows of the plot area, at least 2.
pub fn plot_errors(errors: &[f64], width: usize, height: usize) -> String {
    if errors.is_empty() {
        return "No error data to plot".to_string();
    }

    let width = width.max(20);
    let height = height.max(2);

    let min = errors.iter().copied().fold(f64::INFINITY, f64::min);
    let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    // Row 0 is the top of the chart, it holds `max`.
    let row_of = |error: f64| -> usize {
        if !(range > 0.) || !range.is_finite() {
            return 0;
        }

        let scaled = ((error - min) / range * (height - 1) as f64).floor() as usize;
        height - 1 - scaled.min(height - 1)
    };

    let mut plot = vec![vec![' '; width]; height];
    let columns = width.min(errors.len());

    for i in 0..columns {
        let x = i * errors.len() / columns;
        plot[row_of(errors[x])][i] = '*';
    }

    let mut out = String::new();

    for (i, row) in plot.iter().enumerate() {
        let value = max - (i as f64 / (height - 1) as f64) * range;
        let value = if value.is_finite() { value } else { max };
        out.push_str(&format!("{value:>8.4} |{}\n", row.iter().collect::<String>()));
    }

    out.push_str(&format!("{:9}{}\n", "", "-".repeat(width)));

    let mut labels = vec![' '; width];
    place(&mut labels, 0, &0.to_string());
    let mid = (errors.len() / 2).to_string();
    place(&mut labels, (width / 2).saturating_sub(mid.len() / 2), &mid);
    let last = errors.len().to_string();
    place(&mut labels, width.saturating_sub(last.len()), &last);
    out.push_str(&format!("{:9}{}\n", "", labels.iter().collect::<String>()));

    let title = "Training Epochs";
    out.push_str(&format!(
        "{:9}{:pad$}{title}",
        "",
        "",
        pad = (width / 2).saturating_sub(title.len() / 2)
    ));

    out
}

/// Writes `text` into `line` starting at column `at`, cutting whatever doesn't fit.
fn place(line: &mut [char], at: usize, text: &str) {
    for (cell, c) in line.iter_mut().skip(at).zip(text.chars()) {
        *cell = c;
    }
}

/// Counts of actual versus predicted classes, classes picked by arg max.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    /// `counts[actual][predicted]`.
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Creates a new `ConfusionMatrix`.
    ///
    /// # Arguments
    /// * `predictions` - The network outputs, one vector per sample.
    /// * `targets` - The expected outputs, one vector per sample. The length of the first one
    ///   defines the amount of classes.
    /// * `labels` - A name per class, ignored (in favor of `Class i`) unless there's exactly one
    ///   per class.
    ///
    /// # Returns
    /// The matrix or `MlErr::SizeMismatch` if there isn't one prediction per target or any vector
    /// doesn't have one value per class.
    pub fn new<S: AsRef<str>>(
        predictions: &[Vec<f64>],
        targets: &[Vec<f64>],
        labels: &[S],
    ) -> Result<Self> {
        if predictions.len() != targets.len() {
            return Err(MlErr::SizeMismatch {
                what: "predictions",
                got: predictions.len(),
                expected: targets.len(),
            });
        }

        let classes = targets.first().map_or(0, Vec::len);

        for (prediction, target) in predictions.iter().zip(targets) {
            if target.len() != classes {
                return Err(MlErr::SizeMismatch {
                    what: "target",
                    got: target.len(),
                    expected: classes,
                });
            }

            if prediction.len() != classes {
                return Err(MlErr::SizeMismatch {
                    what: "prediction",
                    got: prediction.len(),
                    expected: classes,
                });
            }
        }

        let labels: Vec<String> = if labels.len() == classes {
            labels.iter().map(|l| l.as_ref().to_string()).collect()
        } else {
            (0..classes).map(|i| format!("Class {i}")).collect()
        };

        let mut counts = vec![vec![0; classes]; classes];

        for (prediction, target) in predictions.iter().zip(targets) {
            if let (Some(actual), Some(predicted)) = (arg_max(target), arg_max(prediction)) {
                counts[actual][predicted] += 1;
            }
        }

        Ok(Self { labels, counts })
    }

    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// How many samples of class `actual` were predicted as `predicted`.
    pub fn count(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// The ratio of correctly classified samples, `0` without samples.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        let correct: usize = (0..self.num_classes()).map(|i| self.counts[i][i]).sum();
        ratio(correct, total)
    }

    /// Of all samples predicted as `class`, the ratio that really were.
    pub fn precision(&self, class: usize) -> f64 {
        let predicted: usize = self.counts.iter().map(|row| row[class]).sum();
        ratio(self.counts[class][class], predicted)
    }

    /// Of all samples of `class`, the ratio predicted as such.
    pub fn recall(&self, class: usize) -> f64 {
        let actual: usize = self.counts[class].iter().sum();
        ratio(self.counts[class][class], actual)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;
        writeln!(f)?;

        write!(f, "{:7}", "")?;
        for label in &self.labels {
            write!(f, "{label:>7} ")?;
        }
        writeln!(f, "  Recall")?;

        for (i, row) in self.counts.iter().enumerate() {
            write!(f, "{:<7}", self.labels[i])?;
            for count in row {
                write!(f, "{count:>7} ")?;
            }
            writeln!(f, "  {}", format_percent(self.recall(i)))?;
        }

        write!(f, "{:<7}", "Prec.")?;
        for i in 0..self.num_classes() {
            write!(f, "{:>7} ", format_percent(self.precision(i)))?;
        }

        write!(f, "\n\nAccuracy: {}", format_percent(self.accuracy()))
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_have_two_decimals() {
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(0.1234), "12.34%");
        assert_eq!(format_percent(1.), "100.00%");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.5, 10), "[=====     ] 50.00%");
        assert_eq!(progress_bar(0., 4), "[    ] 0.00%");
        assert_eq!(progress_bar(1., 4), "[====] 100.00%");
        assert_eq!(progress_bar(1.5, 4), "[====] 150.00%");
    }

    #[test]
    fn arg_max_picks_the_first_maximum() {
        assert_eq!(arg_max(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(arg_max(&[0.5, 0.5, 0.1]), Some(0));
        assert_eq!(arg_max(&[-3.]), Some(0));
        assert_eq!(arg_max(&[]), None);
    }

    #[test]
    fn plotting_nothing() {
        assert_eq!(plot_errors(&[], 60, 15), "No error data to plot");
    }

    #[test]
    fn plot_has_one_line_per_row_plus_axis_and_labels() {
        let errors: Vec<f64> = (0..100).map(|i| 1. / (i + 1) as f64).collect();
        let plot = plot_errors(&errors, 40, 10);
        let lines: Vec<_> = plot.lines().collect();

        assert_eq!(lines.len(), 10 + 3);
        assert!(lines[0].starts_with("  1.0000 |*"));
        assert!(lines[9].starts_with("  0.0100 |"));
        assert!(lines[9].ends_with('*'));
        assert_eq!(lines[10], format!("{:9}{}", "", "-".repeat(40)));
        assert!(lines[11].contains("50") && lines[11].trim_end().ends_with("100"));
        assert!(lines[12].ends_with("Training Epochs"));
    }

    #[test]
    fn flat_series_sit_on_the_top_row() {
        let plot = plot_errors(&[0.25; 5], 20, 4);
        let lines: Vec<_> = plot.lines().collect();

        assert_eq!(lines[0], format!("  0.2500 |{}{}", "*".repeat(5), " ".repeat(15)));
        assert!(lines[1..4].iter().all(|l| !l.contains('*')));
    }

    fn one_hot(class: usize) -> Vec<f64> {
        let mut v = vec![0.; 3];
        v[class] = 1.;
        v
    }

    #[test]
    fn confusion_matrix_counts_and_metrics() {
        let targets = vec![one_hot(0), one_hot(0), one_hot(1), one_hot(2)];
        let predictions = vec![
            vec![0.9, 0.1, 0.0],
            vec![0.2, 0.7, 0.1],
            vec![0.1, 0.8, 0.1],
            vec![0.0, 0.3, 0.6],
        ];

        let matrix = ConfusionMatrix::new(&predictions, &targets, &["a", "b", "c"]).unwrap();

        assert_eq!(matrix.num_classes(), 3);
        assert_eq!(matrix.count(0, 0), 1);
        assert_eq!(matrix.count(0, 1), 1);
        assert_eq!(matrix.count(1, 1), 1);
        assert_eq!(matrix.count(2, 2), 1);
        assert_eq!(matrix.total(), 4);
        assert_eq!(matrix.accuracy(), 0.75);
        assert_eq!(matrix.recall(0), 0.5);
        assert_eq!(matrix.precision(1), 0.5);
        assert_eq!(matrix.precision(2), 1.);

        let text = matrix.to_string();
        assert!(text.starts_with("Confusion Matrix:\n\n"));
        assert!(text.contains("  Recall\n"));
        assert!(text.contains("Prec.  "));
        assert!(text.ends_with("Accuracy: 75.00%"));
    }

    #[test]
    fn labels_fall_back_to_class_numbers() {
        let targets = vec![one_hot(1)];
        let predictions = vec![one_hot(1)];

        let matrix = ConfusionMatrix::new(&predictions, &targets, &["only one"]).unwrap();
        assert_eq!(matrix.labels(), ["Class 0", "Class 1", "Class 2"]);
        assert_eq!(matrix.accuracy(), 1.);
    }

    #[test]
    fn classes_without_samples_score_zero() {
        let targets = vec![one_hot(0)];
        let predictions = vec![one_hot(0)];

        let matrix = ConfusionMatrix::new::<&str>(&predictions, &targets, &[]).unwrap();
        assert_eq!(matrix.recall(2), 0.);
        assert_eq!(matrix.precision(2), 0.);
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let targets = vec![one_hot(0), one_hot(1)];

        assert!(matches!(
            ConfusionMatrix::new::<&str>(&[one_hot(0)], &targets, &[]),
            Err(MlErr::SizeMismatch {
                what: "predictions",
                got: 1,
                expected: 2
            })
        ));
        assert!(matches!(
            ConfusionMatrix::new::<&str>(&[one_hot(0), vec![1.]], &targets, &[]),
            Err(MlErr::SizeMismatch {
                what: "prediction",
                ..
            })
        ));
    }
}
