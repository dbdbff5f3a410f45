//! Human-readable renderings of a `CalendarDate`

use super::CalendarDate;
use std::str::FromStr;

/// Output style for a rendered date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `01 February 1987`
    #[default]
    Long,
    /// `01-02-1987`
    Numeric,
    /// `1987-02-01`
    Iso,
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(DateStyle::Long),
            "numeric" => Ok(DateStyle::Numeric),
            "iso" => Ok(DateStyle::Iso),
            other => Err(format!("Unknown date style: {}", other)),
        }
    }
}

impl CalendarDate {
    /// Long form with two-digit day and full month name
    pub fn long_form(&self) -> String {
        self.to_naive().format("%d %B %Y").to_string()
    }

    /// Numeric `DD-MM-YYYY`
    pub fn numeric(&self) -> String {
        self.to_naive().format("%d-%m-%Y").to_string()
    }

    /// Month name and year, e.g. `February 1977`
    pub fn month_year(&self) -> String {
        self.to_naive().format("%B %Y").to_string()
    }

    pub fn render(&self, style: DateStyle) -> String {
        match style {
            DateStyle::Long => self.long_form(),
            DateStyle::Numeric => self.numeric(),
            DateStyle::Iso => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderings() {
        let date = CalendarDate::from_ymd(1987, 2, 1).unwrap();
        assert_eq!(date.long_form(), "01 February 1987");
        assert_eq!(date.numeric(), "01-02-1987");
        assert_eq!(date.to_string(), "1987-02-01");
        assert_eq!(date.render(DateStyle::Iso), "1987-02-01");
        assert_eq!(date.render(DateStyle::default()), "01 February 1987");
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("LONG".parse::<DateStyle>().unwrap(), DateStyle::Long);
        assert_eq!("numeric".parse::<DateStyle>().unwrap(), DateStyle::Numeric);
        assert!("fancy".parse::<DateStyle>().is_err());
    }
}
