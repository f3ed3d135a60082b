use chrono::{DateTime, Duration, Utc};

pub struct TimeParser;

impl TimeParser {
    /// 解析指标时间窗口起点，支持多种格式：
    /// - RFC3339 格式：2023-10-01T12:00:00Z
    /// - 相对时间（从现在往前推）：7d, 24h, 2w, 1M, 1d12h
    pub fn parse_since(input: &str) -> Result<DateTime<Utc>, String> {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(dt.with_timezone(&Utc));
        }

        let duration = Self::parse_duration(input)?;
        Utc::now()
            .checked_sub_signed(duration)
            .ok_or_else(|| "计算的起始时间超出了有效范围".to_string())
    }

    /// 解析相对时长，如 1d2h30m
    pub fn parse_duration(input: &str) -> Result<Duration, String> {
        let mut total_duration = Duration::zero();
        let mut remaining = input;

        if remaining.is_empty() {
            return Err("时间格式不能为空".to_string());
        }

        while !remaining.is_empty() {
            let num_len = remaining
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(remaining.len());
            if num_len == 0 {
                return Err(format!("无效的时间格式: '{}'", input));
            }

            let num: i64 = remaining[..num_len]
                .parse()
                .map_err(|_| format!("无效的数字: '{}'", &remaining[..num_len]))?;
            remaining = &remaining[num_len..];

            let unit_len = remaining
                .find(|c: char| !c.is_alphabetic())
                .unwrap_or(remaining.len());
            if unit_len == 0 {
                return Err(format!("缺少时间单位，数字 '{}' 后应跟时间单位", num));
            }
            let unit = &remaining[..unit_len];

            // "M" 表示月，区别于分钟 "m"
            let duration = match unit {
                "M" | "month" | "months" => Duration::days(num * 30),
                _ => match unit.to_lowercase().as_str() {
                    "s" | "sec" | "second" | "seconds" => Duration::seconds(num),
                    "m" | "min" | "minute" | "minutes" => Duration::minutes(num),
                    "h" | "hour" | "hours" => Duration::hours(num),
                    "d" | "day" | "days" => Duration::days(num),
                    "w" | "week" | "weeks" => Duration::weeks(num),
                    "y" | "year" | "years" => Duration::days(num * 365),
                    _ => return Err(format!("不支持的时间单位: '{}'", unit)),
                },
            };

            total_duration += duration;
            remaining = &remaining[unit_len..];
        }

        if total_duration == Duration::zero() {
            return Err("时间间隔不能为零".to_string());
        }
        Ok(total_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative_since() {
        let now = Utc::now();

        let result = TimeParser::parse_since("7d").unwrap();
        assert_eq!((now - result).num_days(), 7);

        let result = TimeParser::parse_since("24h").unwrap();
        assert_eq!((now - result).num_hours(), 24);

        let result = TimeParser::parse_since("1d2h30m").unwrap();
        let expected_seconds = 24 * 3600 + 2 * 3600 + 30 * 60;
        assert!(((now - result).num_seconds() - expected_seconds).abs() < 5);
    }

    #[test]
    fn test_month_and_minute_units_differ() {
        assert_eq!(TimeParser::parse_duration("1M").unwrap(), Duration::days(30));
        assert_eq!(TimeParser::parse_duration("1m").unwrap(), Duration::minutes(1));
    }

    #[test]
    fn test_parse_rfc3339() {
        let result = TimeParser::parse_since("2023-10-01T12:00:00Z").unwrap();
        assert_eq!(result.to_rfc3339(), "2023-10-01T12:00:00+00:00");
    }

    #[test]
    fn test_invalid_format() {
        assert!(TimeParser::parse_since("invalid").is_err());
        assert!(TimeParser::parse_since("1x").is_err());
        assert!(TimeParser::parse_since("").is_err());
        assert!(TimeParser::parse_since("0d").is_err());
        assert!(TimeParser::parse_since("7").is_err());
    }
}
