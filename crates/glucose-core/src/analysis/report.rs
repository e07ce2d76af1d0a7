//! Persian text reports shown by the host UI.

use super::classifier::GlucoseClassifier;
use super::predictor::{CriticalTime, DayForecast, Prediction};
use super::trend::{CrisisDirection, ReadingStatistics, ShortTermTrend, TrendAnalysis};
use crate::config::GlucoseRanges;
use crate::nutrition::suggest_menu;

/// Shown when analysis has too few readings.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "داده کافی برای تحلیل وجود ندارد";

const SINGLE_PREDICTION_DISCLAIMER: &str =
    "⚠️ توجه: این پیش‌بینی صرفاً جنبه آموزشی دارد و نباید جایگزین مشاوره پزشکی باشد.";

const FORECAST_DISCLAIMER: &str =
    "⚠️ توجه: این پیش‌بینی‌ها صرفاً جنبه آموزشی دارند و نباید جایگزین مشاوره پزشکی شوند.";

/// Pattern analysis text: mean assessment, both trend signals, crisis list.
pub fn pattern_report(analysis: &TrendAnalysis, ranges: &GlucoseRanges) -> String {
    let summary = match analysis {
        TrendAnalysis::Summary(summary) => summary,
        TrendAnalysis::InsufficientData { .. } => return INSUFFICIENT_DATA_MESSAGE.to_string(),
    };

    let mut lines = vec![format!("میانگین قند خون: {:.1} mg/dL", summary.mean)];

    lines.push(if summary.mean < ranges.low {
        "⚠️ میانگین قند خون پایین است".to_string()
    } else if summary.mean > ranges.normal_max {
        "⚠️ میانگین قند خون بالا است".to_string()
    } else {
        "✅ میانگین قند خون در محدوده مطلوب است".to_string()
    });

    lines.push(format!(
        "📊 روند کلی: {} (شیب {:.2} mg/dL در هر خوانش، انحراف معیار {:.1})",
        summary.trend.label(),
        summary.slope,
        summary.std_dev
    ));

    lines.push(
        match summary.short_term {
            ShortTermTrend::Increasing => "📈 روند افزایشی قند خون",
            ShortTermTrend::Decreasing => "📉 روند کاهشی قند خون",
            ShortTermTrend::Steady => "➡️ روند ثابت قند خون",
        }
        .to_string(),
    );

    if !summary.crises.is_empty() {
        lines.push(String::new());
        lines.push("🚨 هشدار بحران:".to_string());
        for crisis in &summary.crises {
            lines.push(format!(
                "• {} {} - مقدار: {} ({})",
                crisis.date,
                crisis.time,
                crisis.value,
                crisis.direction.label()
            ));
        }
    }

    lines.join("\n")
}

/// Text for a single-hour prediction.
pub fn prediction_text(hour: u32, prediction: &Prediction, classifier: &GlucoseClassifier) -> String {
    let status = classifier.classify(prediction.value).category.label();
    format!(
        "پیش‌بینی قند خون برای ساعت {hour}:\n\n\
         🔮 مقدار پیش‌بینی شده: {:.1} mg/dL\n\
         📊 اعتماد مدل: {:.1}%\n\
         📈 وضعیت پیش‌بینی شده: {status}\n\n\
         {SINGLE_PREDICTION_DISCLAIMER}",
        prediction.value,
        prediction.confidence * 100.0,
    )
}

/// Warning line for a critical hour.
pub fn critical_time_message(critical: &CriticalTime) -> String {
    match critical.direction {
        CrisisDirection::Low => format!("احتمال افت قند در ساعت {}:00", critical.hour),
        CrisisDirection::High => format!("احتمال افزایش قند در ساعت {}:00", critical.hour),
    }
}

/// Day forecast report with warnings and the extreme hours.
pub fn forecast_report(forecast: &DayForecast, critical: &[CriticalTime]) -> String {
    let mut lines = vec![
        format!("گزارش پیش‌بینی قند خون برای تاریخ {}:", forecast.date),
        String::new(),
        format!(
            "میانگین اطمینان پیش‌بینی: {:.1}%",
            forecast.average_confidence * 100.0
        ),
        String::new(),
    ];

    if !critical.is_empty() {
        lines.push("⚠️ هشدارهای پیش‌بینی شده:".to_string());
        for entry in critical {
            lines.push(format!(
                "• {} - {:.1} mg/dL",
                critical_time_message(entry),
                entry.value
            ));
        }
        lines.push(String::new());
    }

    if let Some(highest) = forecast.highest() {
        lines.push(format!(
            "🔺 بیشترین قند پیش‌بینی شده: {:.1} mg/dL در ساعت {}:00",
            highest.prediction.value, highest.hour
        ));
    }
    if let Some(lowest) = forecast.lowest() {
        lines.push(format!(
            "🔻 کمترین قند پیش‌بینی شده: {:.1} mg/dL در ساعت {}:00",
            lowest.prediction.value, lowest.hour
        ));
    }

    lines.push(String::new());
    lines.push(FORECAST_DISCLAIMER.to_string());
    lines.join("\n")
}

/// Detailed statistics with mood analysis and a menu suggestion.
pub fn statistics_report(stats: &ReadingStatistics) -> String {
    let mood = match &stats.mood_correlation {
        Some(correlation) => format!(
            "تحلیل احساسات:\n• بهترین حالت روحی: {} (میانگین قند: {:.1})\n• بدترین حالت روحی: {} (میانگین قند: {:.1})",
            correlation.best_mood.label(),
            correlation.best_average,
            correlation.worst_mood.label(),
            correlation.worst_average
        ),
        None => "تحلیل احساسات: داده کافی وجود ندارد.".to_string(),
    };

    [
        "آمار تفصیلی:".to_string(),
        "----------------------".to_string(),
        format!("تعداد کل خوانش‌ها: {}", stats.total),
        format!("میانگین قند خون: {:.1} mg/dL", stats.mean),
        format!("کمترین مقدار: {:.0}", stats.min),
        format!("بیشترین مقدار: {:.0}", stats.max),
        format!("در محدوده طبیعی: {}", stats.normal_count),
        format!("بالا: {}", stats.high_count),
        format!("پایین: {}", stats.low_count),
        format!("HbA1c تخمینی: {} %", stats.estimated_hba1c),
        String::new(),
        mood,
        format!("پیشنهاد منوی غذایی: {}", suggest_menu(stats.mean)),
        "----------------------".to_string(),
    ]
    .join("\n")
}
