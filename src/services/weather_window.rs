use crate::models::weather::{DailyObservation, Recommendation};

pub const WINDOW_DAYS: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 3;

const BASE_SCORE: i32 = 100;
const SEVERE_WEATHER_KEYWORDS: [&str; 3] = ["rain", "storm", "snow"];
const UNKNOWN_CONDITION: &str = "Variable";

/// Ranks overlapping 3-day forecast windows by how pleasant they are for travel.
pub struct WeatherWindowScorer;

impl WeatherWindowScorer {
    /// Score every 3-day window in the forecast and return the best ones, highest score first.
    ///
    /// Forecasts shorter than three days produce no recommendations. Windows with equal
    /// scores keep their forecast order.
    pub fn score_windows(forecast: &[DailyObservation]) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = forecast
            .windows(WINDOW_DAYS)
            .map(Self::recommend)
            .collect();

        // sort_by is stable, so earlier windows win ties
        recommendations.sort_by(|a, b| b.score.cmp(&a.score));
        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }

    fn recommend(window: &[DailyObservation]) -> Recommendation {
        let score = Self::score_window(window);
        Recommendation {
            date_range_label: Self::date_range_label(window),
            representative_condition: Self::representative_condition(window),
            average_temperature_c: Self::average_temperature(window),
            score,
            description: Self::describe(score, Self::total_precipitation(window)).to_string(),
        }
    }

    /// Base score plus every day's adjustments, clamped to 0..=100 only once the
    /// whole window has been summed.
    pub fn score_window(window: &[DailyObservation]) -> u8 {
        let total: i32 = BASE_SCORE + window.iter().map(Self::day_adjustment).sum::<i32>();
        total.clamp(0, 100) as u8
    }

    pub fn day_adjustment(day: &DailyObservation) -> i32 {
        temperature_adjustment(day.average_temperature_c)
            + precipitation_adjustment(day.total_precipitation_mm)
            + wind_adjustment(day.max_wind_speed_kph)
            + humidity_adjustment(day.average_humidity_percent)
            + uv_adjustment(day.uv_index)
    }

    /// First condition mentioning rain, storm or snow; otherwise the first day's condition.
    pub fn representative_condition(window: &[DailyObservation]) -> String {
        window
            .iter()
            .find(|day| {
                let condition = day.condition_text.to_lowercase();
                SEVERE_WEATHER_KEYWORDS
                    .iter()
                    .any(|keyword| condition.contains(keyword))
            })
            .or_else(|| window.first())
            .map(|day| day.condition_text.clone())
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string())
    }

    pub fn average_temperature(window: &[DailyObservation]) -> i32 {
        if window.is_empty() {
            return 0;
        }
        let sum: f64 = window.iter().map(|day| day.average_temperature_c).sum();
        round_half_up(sum / window.len() as f64)
    }

    pub fn total_precipitation(window: &[DailyObservation]) -> f64 {
        window.iter().map(|day| day.total_precipitation_mm).sum()
    }

    pub fn describe(score: u8, total_rain: f64) -> &'static str {
        match score {
            90..=u8::MAX => "Excellent weather conditions for all outdoor activities",
            75..=89 if total_rain > 5.0 => "Good weather with occasional light rain",
            75..=89 => "Generally pleasant conditions",
            60..=74 if total_rain > 15.0 => "Moderate rain expected, mix of indoor/outdoor activities",
            60..=74 => "Average weather conditions",
            _ if total_rain > 20.0 => "Significant rain likely, focus on indoor attractions",
            _ => "Challenging weather conditions",
        }
    }

    /// "Sep 15 - Sep 17" style label for the first and last day of the window.
    pub fn date_range_label(window: &[DailyObservation]) -> String {
        match (window.first(), window.last()) {
            (Some(first), Some(last)) => format!(
                "{} - {}",
                first.date.format("%b %-d"),
                last.date.format("%b %-d")
            ),
            _ => String::new(),
        }
    }
}

fn temperature_adjustment(t: f64) -> i32 {
    if t < 10.0 || t > 35.0 {
        -20
    } else if t < 15.0 || t > 30.0 {
        -10
    } else if (20.0..=25.0).contains(&t) {
        5
    } else {
        0
    }
}

fn precipitation_adjustment(r: f64) -> i32 {
    if r > 20.0 {
        -25
    } else if r > 10.0 {
        -15
    } else if r > 5.0 {
        -8
    } else if r < 1.0 {
        5
    } else {
        0
    }
}

fn wind_adjustment(w: f64) -> i32 {
    if w > 50.0 {
        -20
    } else if w > 30.0 {
        -10
    } else if w < 15.0 {
        3
    } else {
        0
    }
}

fn humidity_adjustment(h: f64) -> i32 {
    if h > 80.0 {
        -10
    } else if h < 30.0 {
        -5
    } else {
        0
    }
}

fn uv_adjustment(u: f64) -> i32 {
    if u > 10.0 {
        -10
    } else if (3.0..=7.0).contains(&u) {
        3
    } else {
        0
    }
}

// Halves round toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn day(
        d: u32,
        temp: f64,
        rain: f64,
        wind: f64,
        humidity: f64,
        uv: f64,
        condition: &str,
    ) -> DailyObservation {
        DailyObservation {
            date: date(9, d),
            average_temperature_c: temp,
            total_precipitation_mm: rain,
            max_wind_speed_kph: wind,
            average_humidity_percent: humidity,
            uv_index: uv,
            condition_text: condition.to_string(),
        }
    }

    fn ideal(d: u32) -> DailyObservation {
        day(d, 22.0, 0.0, 10.0, 50.0, 5.0, "Sunny")
    }

    fn awful(d: u32) -> DailyObservation {
        day(d, 40.0, 30.0, 60.0, 90.0, 12.0, "Thunderstorm")
    }

    /// Neutral day (17C, 2mm, 20kph, 50%, uv 8) nudged by wind or humidity to reach `delta`.
    fn day_with_adjustment(d: u32, delta: i32) -> DailyObservation {
        let mut obs = day(d, 17.0, 2.0, 20.0, 50.0, 8.0, "Cloudy");
        match delta {
            0 => {}
            -10 => obs.average_humidity_percent = 90.0,
            -20 => obs.max_wind_speed_kph = 60.0,
            -5 => obs.average_humidity_percent = 20.0,
            -25 => {
                obs.max_wind_speed_kph = 60.0;
                obs.average_humidity_percent = 20.0;
            }
            _ => panic!("unsupported delta {delta}"),
        }
        obs
    }

    #[test]
    fn test_short_forecast_has_no_windows() {
        assert!(WeatherWindowScorer::score_windows(&[]).is_empty());
        assert!(WeatherWindowScorer::score_windows(&[ideal(1)]).is_empty());
        assert!(WeatherWindowScorer::score_windows(&[ideal(1), ideal(2)]).is_empty());
    }

    #[test]
    fn test_window_count_is_capped_at_three() {
        for n in 3..=10u32 {
            let forecast: Vec<_> = (1..=n).map(ideal).collect();
            let expected = std::cmp::min(3, n as usize - 2);
            assert_eq!(WeatherWindowScorer::score_windows(&forecast).len(), expected);
        }
    }

    #[test]
    fn test_ideal_window_clamps_at_one_hundred() {
        assert_eq!(WeatherWindowScorer::day_adjustment(&ideal(1)), 13);
        let window = [ideal(1), ideal(2), ideal(3)];
        assert_eq!(WeatherWindowScorer::score_window(&window), 100);
    }

    #[test]
    fn test_worst_window_clamps_at_zero() {
        assert_eq!(WeatherWindowScorer::day_adjustment(&awful(1)), -85);
        let window = [awful(1), awful(2), awful(3)];
        assert_eq!(WeatherWindowScorer::score_window(&window), 0);
    }

    #[test]
    fn test_clamp_applies_to_the_total_not_each_day() {
        // -85 + 13 + 13 = -59 -> 41; a per-day clamp would give a different answer
        let window = [awful(1), ideal(2), ideal(3)];
        assert_eq!(WeatherWindowScorer::score_window(&window), 41);
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(temperature_adjustment(9.9), -20);
        assert_eq!(temperature_adjustment(35.1), -20);
        assert_eq!(temperature_adjustment(10.0), -10);
        assert_eq!(temperature_adjustment(14.9), -10);
        assert_eq!(temperature_adjustment(30.5), -10);
        assert_eq!(temperature_adjustment(35.0), -10);
        assert_eq!(temperature_adjustment(15.0), 0);
        assert_eq!(temperature_adjustment(19.9), 0);
        assert_eq!(temperature_adjustment(20.0), 5);
        assert_eq!(temperature_adjustment(25.0), 5);
        assert_eq!(temperature_adjustment(25.1), 0);
        assert_eq!(temperature_adjustment(30.0), 0);
    }

    #[test]
    fn test_precipitation_wind_humidity_uv_bands() {
        assert_eq!(precipitation_adjustment(20.5), -25);
        assert_eq!(precipitation_adjustment(20.0), -15);
        assert_eq!(precipitation_adjustment(10.0), -8);
        assert_eq!(precipitation_adjustment(5.0), 0);
        assert_eq!(precipitation_adjustment(1.0), 0);
        assert_eq!(precipitation_adjustment(0.9), 5);

        assert_eq!(wind_adjustment(51.0), -20);
        assert_eq!(wind_adjustment(50.0), -10);
        assert_eq!(wind_adjustment(30.0), 0);
        assert_eq!(wind_adjustment(15.0), 0);
        assert_eq!(wind_adjustment(14.9), 3);

        assert_eq!(humidity_adjustment(80.1), -10);
        assert_eq!(humidity_adjustment(80.0), 0);
        assert_eq!(humidity_adjustment(30.0), 0);
        assert_eq!(humidity_adjustment(29.9), -5);

        assert_eq!(uv_adjustment(10.5), -10);
        assert_eq!(uv_adjustment(10.0), 0);
        assert_eq!(uv_adjustment(7.0), 3);
        assert_eq!(uv_adjustment(3.0), 3);
        assert_eq!(uv_adjustment(2.9), 0);
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let forecast = vec![
            awful(1),
            ideal(2),
            day(3, 12.0, 7.0, 35.0, 85.0, 9.0, "Overcast"),
            ideal(4),
            awful(5),
            day(6, -5.0, 50.0, 100.0, 100.0, 15.0, "Blizzard"),
        ];
        for rec in WeatherWindowScorer::score_windows(&forecast) {
            assert!(rec.score <= 100);
        }
    }

    #[test]
    fn test_ranking_is_descending() {
        // window scores in start order: 70, 95, 80
        let forecast = vec![
            day_with_adjustment(1, -25),
            day_with_adjustment(2, -5),
            day_with_adjustment(3, 0),
            day_with_adjustment(4, 0),
            day_with_adjustment(5, -20),
        ];
        let in_order: Vec<u8> = forecast
            .windows(3)
            .map(WeatherWindowScorer::score_window)
            .collect();
        assert_eq!(in_order, vec![70, 95, 80]);

        let ranked: Vec<u8> = WeatherWindowScorer::score_windows(&forecast)
            .iter()
            .map(|r| r.score)
            .collect();
        assert_eq!(ranked, vec![95, 80, 70]);
    }

    #[test]
    fn test_ties_keep_forecast_order() {
        let forecast: Vec<_> = (15..=19).map(ideal).collect();
        let labels: Vec<String> = WeatherWindowScorer::score_windows(&forecast)
            .into_iter()
            .map(|r| r.date_range_label)
            .collect();
        assert_eq!(
            labels,
            vec!["Sep 15 - Sep 17", "Sep 16 - Sep 18", "Sep 17 - Sep 19"]
        );
    }

    #[test]
    fn test_representative_condition_prefers_severe_weather() {
        let window = [
            day(1, 22.0, 0.0, 10.0, 50.0, 5.0, "Sunny"),
            day(2, 22.0, 3.0, 10.0, 50.0, 5.0, "Light rain"),
            day(3, 22.0, 0.0, 10.0, 50.0, 5.0, "Cloudy"),
        ];
        assert_eq!(
            WeatherWindowScorer::representative_condition(&window),
            "Light rain"
        );
    }

    #[test]
    fn test_representative_condition_is_case_insensitive_and_first_match() {
        let window = [
            day(1, 22.0, 0.0, 10.0, 50.0, 5.0, "Partly cloudy"),
            day(2, 22.0, 0.0, 10.0, 50.0, 5.0, "Heavy SNOW"),
            day(3, 22.0, 0.0, 10.0, 50.0, 5.0, "Thunderstorm"),
        ];
        assert_eq!(
            WeatherWindowScorer::representative_condition(&window),
            "Heavy SNOW"
        );
    }

    #[test]
    fn test_representative_condition_defaults() {
        let window = [ideal(1), ideal(2), ideal(3)];
        assert_eq!(WeatherWindowScorer::representative_condition(&window), "Sunny");
        assert_eq!(WeatherWindowScorer::representative_condition(&[]), "Variable");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            WeatherWindowScorer::describe(92, 0.0),
            "Excellent weather conditions for all outdoor activities"
        );
        assert_eq!(
            WeatherWindowScorer::describe(80, 8.0),
            "Good weather with occasional light rain"
        );
        assert_eq!(
            WeatherWindowScorer::describe(80, 5.0),
            "Generally pleasant conditions"
        );
        assert_eq!(
            WeatherWindowScorer::describe(65, 20.0),
            "Moderate rain expected, mix of indoor/outdoor activities"
        );
        assert_eq!(
            WeatherWindowScorer::describe(60, 15.0),
            "Average weather conditions"
        );
        assert_eq!(
            WeatherWindowScorer::describe(40, 25.0),
            "Significant rain likely, focus on indoor attractions"
        );
        assert_eq!(
            WeatherWindowScorer::describe(0, 20.0),
            "Challenging weather conditions"
        );
    }

    #[test]
    fn test_average_temperature_rounds_to_nearest() {
        let mut window = [ideal(1), ideal(2), ideal(3)];
        window[0].average_temperature_c = 20.0;
        window[1].average_temperature_c = 21.0;
        window[2].average_temperature_c = 23.5;
        // 64.5 / 3 = 21.5
        assert_eq!(WeatherWindowScorer::average_temperature(&window), 22);

        window[0].average_temperature_c = -3.0;
        window[1].average_temperature_c = -2.0;
        window[2].average_temperature_c = -2.5;
        assert_eq!(WeatherWindowScorer::average_temperature(&window), -2);
    }

    #[test]
    fn test_date_range_label() {
        let window = [ideal(15), ideal(16), ideal(17)];
        assert_eq!(
            WeatherWindowScorer::date_range_label(&window),
            "Sep 15 - Sep 17"
        );

        let window = [
            DailyObservation::new(date(9, 30), 22.0, "Sunny"),
            DailyObservation::new(date(10, 1), 22.0, "Sunny"),
            DailyObservation::new(date(10, 2), 22.0, "Sunny"),
        ];
        assert_eq!(
            WeatherWindowScorer::date_range_label(&window),
            "Sep 30 - Oct 2"
        );
    }

    #[test]
    fn test_recommendation_fields() {
        let forecast = vec![
            day(15, 24.0, 2.0, 20.0, 60.0, 6.0, "Sunny"),
            day(16, 22.0, 4.0, 12.0, 70.0, 6.0, "Patchy rain possible"),
            day(17, 19.0, 1.0, 18.0, 65.0, 4.0, "Overcast"),
        ];
        let recs = WeatherWindowScorer::score_windows(&forecast);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        // day 1: +5 +0 +0 +0 +3 = 8, day 2: +5 +0 +3 +0 +3 = 11, day 3: 0 +0 +0 +0 +3 = 3
        assert_eq!(rec.score, 100);
        assert_eq!(rec.date_range_label, "Sep 15 - Sep 17");
        assert_eq!(rec.representative_condition, "Patchy rain possible");
        assert_eq!(rec.average_temperature_c, 22);
        assert_eq!(
            rec.description,
            "Excellent weather conditions for all outdoor activities"
        );
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let forecast = vec![
            awful(1),
            ideal(2),
            day(3, 12.0, 7.0, 35.0, 85.0, 9.0, "Overcast"),
            ideal(4),
            ideal(5),
        ];
        let snapshot = forecast.clone();
        let first = WeatherWindowScorer::score_windows(&forecast);
        let second = WeatherWindowScorer::score_windows(&forecast);
        assert_eq!(first, second);
        assert_eq!(forecast, snapshot);
    }
}
