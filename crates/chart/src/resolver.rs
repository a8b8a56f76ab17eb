use tickerlens_core::chart::entity::{LookbackCode, Preset, ResolvedWindow, WindowSelection};
use tickerlens_core::chart::error::ChartError;

/// # Summary
/// 预设窗口到数据源回溯代码的固定映射表。
///
/// # Logic
/// 穷尽匹配，每个预设唯一对应一个回溯代码。
pub fn lookback_for(preset: Preset) -> LookbackCode {
    match preset {
        Preset::OneDay => LookbackCode::Day1,
        Preset::FiveDays => LookbackCode::Day5,
        Preset::OneMonth => LookbackCode::Month1,
        Preset::ThreeMonths => LookbackCode::Month3,
        Preset::SixMonths => LookbackCode::Month6,
        Preset::OneYear => LookbackCode::Year1,
        Preset::FiveYears => LookbackCode::Year5,
    }
}

/// # Summary
/// 将用户的窗口选择解析为可直接请求数据源的具体窗口。
///
/// # Logic
/// 1. 预设窗口查表得到回溯代码。
/// 2. 显式窗口校验 `start <= end`，允许起止同一天。
///
/// # Arguments
/// * `selection`: 用户选择。
///
/// # Returns
/// 成功返回 `ResolvedWindow`，起始晚于结束返回 `ChartError::InvalidWindow`。
pub fn resolve(selection: WindowSelection) -> Result<ResolvedWindow, ChartError> {
    match selection {
        WindowSelection::Preset(preset) => Ok(ResolvedWindow::Lookback(lookback_for(preset))),
        WindowSelection::Explicit { start, end } => {
            if start > end {
                return Err(ChartError::InvalidWindow { start, end });
            }
            Ok(ResolvedWindow::Range { start, end })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn test_one_month_preset_resolves_to_1mo() {
        let window = resolve(WindowSelection::Preset(Preset::OneMonth));
        assert_eq!(window, Ok(ResolvedWindow::Lookback(LookbackCode::Month1)));
        assert_eq!(lookback_for(Preset::OneMonth).to_string(), "1mo");
    }

    #[test]
    fn test_every_preset_has_provider_code() {
        let codes: Vec<String> = Preset::ALL
            .into_iter()
            .map(|p| lookback_for(p).to_string())
            .collect();
        assert_eq!(codes, vec!["1d", "5d", "1mo", "3mo", "6mo", "1y", "5y"]);
    }

    #[test]
    fn test_explicit_window_bounds() {
        let same_day = resolve(WindowSelection::Explicit {
            start: date(2024, 5, 1),
            end: date(2024, 5, 1),
        });
        assert!(same_day.is_ok());

        let reversed = resolve(WindowSelection::Explicit {
            start: date(2024, 6, 1),
            end: date(2024, 5, 1),
        });
        assert_eq!(
            reversed,
            Err(ChartError::InvalidWindow {
                start: date(2024, 6, 1),
                end: date(2024, 5, 1),
            })
        );
    }
}
