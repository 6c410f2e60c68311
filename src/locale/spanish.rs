//! Spanish language pack.

use regex::Regex;

use crate::clock::TimeGrammar;
use crate::pack::{count_occurrences, fold, LanguagePack, PackError, WeekdayTable};
use crate::token::{DurationUnit, PartOfDay, RelativeDay};

use super::compile;

const WEEKDAYS: &str =
    "lunes|martes|mi[ée]rcoles|jueves|viernes|s[áa]bado|domingo|lun|mar|mi[ée]|jue|vie|s[áa]b|dom";

/// Endpoint: "9", "9:30", optionally "… de la tarde".
const ENDPOINT: &str =
    r"\d{1,2}(?::\d{2})?(?:\s+de\s+la\s+(?:ma[ñn]ana|madrugada|tarde|noche))?\b";

const UNITS: &str = "minutos|minuto|min|horas|hora|h|d[íi]as|d[íi]a|semanas|semana|meses|mes";

const THIS_WORDS: &[&str] = &["este", "esta"];
const NEXT_WORDS: &[&str] = &["próximo", "próxima", "que viene", "siguiente", "entrante"];
const LAST_WORDS: &[&str] = &["pasado", "pasada", "último", "última"];

pub struct SpanishPack {
    weekdays: WeekdayTable,
    grammar: TimeGrammar,
    weekday: Regex,
    week: Regex,
    bare_week: Regex,
    weekend: Regex,
    relative_day: Regex,
    part_of_day: Regex,
    ordinal_day: Regex,
    weekday_time: Regex,
    from_to: Regex,
    between: Regex,
    time_only: Regex,
    in_duration: Regex,
    by_duration: Regex,
    article_duration: Regex,
    connector: Regex,
    command_prefix: Regex,
}

impl SpanishPack {
    pub fn new() -> Result<Self, PackError> {
        let weekdays = WeekdayTable::from_names([
            "domingo",
            "lunes",
            "martes",
            "miércoles",
            "jueves",
            "viernes",
            "sábado",
        ])
        .alias("dom", 1)
        .alias("lun", 2)
        .alias("mar", 3)
        .alias("mié", 4)
        .alias("miercoles", 4)
        .alias("jue", 5)
        .alias("vie", 6)
        .alias("sáb", 7);

        let grammar = TimeGrammar::new(
            &["de la mañana", "de la manana", "de la madrugada"],
            &["de la tarde", "de la noche"],
            &["mediodía", "mediodia"],
            &["medianoche"],
        )
        .map_err(|e| PackError::pattern("time grammar", e))?;

        Ok(Self {
            weekdays,
            grammar,
            weekday: compile(
                "weekday",
                &format!(
                    r"(?i)\b(?:(?P<modifier>pr[óo]xim[oa]|este|esta)\s+)?(?:el\s+)?(?P<weekday>{WEEKDAYS})(?:\s+(?P<postmod>que\s+viene|pasad[oa]|siguiente|entrante))?\b"
                ),
            )?,
            week: compile(
                "week",
                r"(?i)\b(?:(?P<prefix>(?:pr[óo]xima\s+|esta\s+|[úu]ltima\s+)+)semana|(?:la\s+)?semana\s+(?P<post>que\s+viene|pasada|entrante|siguiente))\b",
            )?,
            bare_week: compile("bare week", r"(?i)\b(?:mi|la)\s+semana\b")?,
            weekend: compile(
                "weekend",
                r"(?i)\b(?:(?P<modifier>pr[óo]ximo|este|el)\s+)?(?:finde|fin\s+de\s+semana)(?:\s+(?P<post>que\s+viene|entrante))?\b",
            )?,
            relative_day: compile(
                "relative day",
                r"(?i)\bpasado\s+ma[ñn]ana\b|\besta\s+noche\b|\banoche\b|\bma[ñn]ana\b|\bhoy\b|\bayer\b",
            )?,
            part_of_day: compile(
                "part of day",
                r"(?i)\b(?:por|en|de)\s+la\s+(?P<word>ma[ñn]ana|tarde|noche)\b|\b(?:al\s+)?(?P<word2>mediod[íi]a|medianoche|madrugada)\b",
            )?,
            ordinal_day: compile(
                "ordinal day",
                r"(?i)\b(?:el\s+)?d[íi]a\s+(?P<day>\d{1,2})\b|\bel\s+(?P<day2>\d{1,2})\b",
            )?,
            weekday_time: compile(
                "weekday time",
                &format!(
                    r"(?i)\b(?P<wd>{WEEKDAYS})\s+(?:a\s+las?\s+)?(?P<t1>{ENDPOINT})(?:\s*(?:-|hasta|a)\s*(?P<t2>{ENDPOINT}))?"
                ),
            )?,
            from_to: compile(
                "from-to range",
                &format!(
                    r"(?i)\b(?:(?P<wd>{WEEKDAYS})\s+)?(?P<range>de\s+(?:las?\s+)?(?P<a>{ENDPOINT})\s+a\s+(?:las?\s+)?(?P<b>{ENDPOINT}))"
                ),
            )?,
            between: compile(
                "between range",
                &format!(
                    r"(?i)\b(?:(?P<wd>{WEEKDAYS})\s+)?(?P<range>entre\s+(?:las?\s+)?(?P<a>{ENDPOINT})\s+y\s+(?:las?\s+)?(?P<b>{ENDPOINT}))"
                ),
            )?,
            time_only: compile(
                "time only",
                &format!(
                    r"(?i)\b(?P<word>mediod[íi]a|medianoche)\b|\ba\s+las?\s+(?P<cued>{ENDPOINT})|\b(?P<time>\d{{1,2}}:\d{{2}}(?:\s+de\s+la\s+(?:ma[ñn]ana|madrugada|tarde|noche))?)\b"
                ),
            )?,
            in_duration: compile(
                "in-duration",
                &format!(r"(?i)\b(?:dentro\s+de|en)\s+(?P<value>\d+)\s*(?P<unit>{UNITS})\b"),
            )?,
            by_duration: compile(
                "by-duration",
                &format!(r"(?i)\bpor\s+(?P<value>\d+)\s*(?P<unit>{UNITS})\b"),
            )?,
            article_duration: compile(
                "article duration",
                r"(?i)\b(?:dentro\s+de|en)\s+(?:un|una)\s+(?P<unit>minuto|hora|d[íi]a|semana|mes)\b",
            )?,
            connector: compile("connector", r"(?i)\ba\s+las?\b|\bel\b")?,
            command_prefix: compile(
                "command prefix",
                r"(?i)^\s*(?:por\s+favor,?\s+)?(?:recu[ée]rdame\s+(?:de\s+)?|recordarme\s+(?:de\s+)?|agendar?|programar?|crear?|mover?|reprogramar?|mostrar?|cancelar?)\b\s*",
            )?,
        })
    }
}

impl LanguagePack for SpanishPack {
    fn weekday_table(&self) -> &WeekdayTable {
        &self.weekdays
    }

    fn time_grammar(&self) -> &TimeGrammar {
        &self.grammar
    }

    fn this_words(&self) -> &[&str] {
        THIS_WORDS
    }

    fn next_words(&self) -> &[&str] {
        NEXT_WORDS
    }

    fn last_words(&self) -> &[&str] {
        LAST_WORDS
    }

    fn relative_day_of(&self, word: &str) -> Option<RelativeDay> {
        match fold(word.trim()).as_str() {
            "esta noche" => Some(RelativeDay::Tonight),
            "hoy" => Some(RelativeDay::Today),
            "manana" => Some(RelativeDay::Tomorrow),
            "ayer" | "anoche" => Some(RelativeDay::Yesterday),
            // "pasado mañana" has no single-day equivalent here; the
            // match still consumes the phrase so "mañana" alone does
            // not fire inside it.
            _ => None,
        }
    }

    fn part_of_day_of(&self, word: &str) -> Option<PartOfDay> {
        match fold(word.trim()).as_str() {
            "manana" => Some(PartOfDay::Morning),
            "tarde" => Some(PartOfDay::Afternoon),
            "noche" => Some(PartOfDay::Night),
            "madrugada" => Some(PartOfDay::Night),
            "mediodia" => Some(PartOfDay::Noon),
            "medianoche" => Some(PartOfDay::Midnight),
            _ => None,
        }
    }

    fn duration_unit_of(&self, word: &str) -> Option<DurationUnit> {
        match fold(word.trim()).as_str() {
            "minuto" | "minutos" | "min" => Some(DurationUnit::Minute),
            "hora" | "horas" | "h" => Some(DurationUnit::Hour),
            "dia" | "dias" => Some(DurationUnit::Day),
            "semana" | "semanas" => Some(DurationUnit::Week),
            "mes" | "meses" => Some(DurationUnit::Month),
            _ => None,
        }
    }

    fn weekday_pattern(&self) -> Option<&Regex> {
        Some(&self.weekday)
    }
    fn week_pattern(&self) -> Option<&Regex> {
        Some(&self.week)
    }
    fn bare_week_pattern(&self) -> Option<&Regex> {
        Some(&self.bare_week)
    }
    fn weekend_pattern(&self) -> Option<&Regex> {
        Some(&self.weekend)
    }
    fn relative_day_pattern(&self) -> Option<&Regex> {
        Some(&self.relative_day)
    }
    fn part_of_day_pattern(&self) -> Option<&Regex> {
        Some(&self.part_of_day)
    }
    fn ordinal_day_pattern(&self) -> Option<&Regex> {
        Some(&self.ordinal_day)
    }
    fn weekday_time_pattern(&self) -> Option<&Regex> {
        Some(&self.weekday_time)
    }
    fn from_to_pattern(&self) -> Option<&Regex> {
        Some(&self.from_to)
    }
    fn between_pattern(&self) -> Option<&Regex> {
        Some(&self.between)
    }
    fn time_only_pattern(&self) -> Option<&Regex> {
        Some(&self.time_only)
    }
    fn in_duration_pattern(&self) -> Option<&Regex> {
        Some(&self.in_duration)
    }
    fn by_duration_pattern(&self) -> Option<&Regex> {
        Some(&self.by_duration)
    }
    fn article_duration_pattern(&self) -> Option<&Regex> {
        Some(&self.article_duration)
    }
    fn connector_pattern(&self) -> Option<&Regex> {
        Some(&self.connector)
    }
    fn command_prefix_pattern(&self) -> Option<&Regex> {
        Some(&self.command_prefix)
    }

    /// "por la mañana" is a part of day, never the relative day
    /// "mañana"; the detector drops the inner match.
    fn suppress_relative_day_inside_part_of_day(&self) -> bool {
        true
    }

    fn next_repetition_count(&self, phrase: &str) -> u32 {
        count_occurrences(phrase, NEXT_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_with_article() {
        let pack = SpanishPack::new().unwrap();
        let caps = pack.weekday.captures("el martes que viene").unwrap();
        assert_eq!(caps.name("weekday").unwrap().as_str(), "martes");
        assert_eq!(caps.name("postmod").unwrap().as_str(), "que viene");
    }

    #[test]
    fn week_phrase_variants() {
        let pack = SpanishPack::new().unwrap();
        assert!(pack.week.is_match("la semana que viene"));
        assert!(pack.week.is_match("próxima semana"));
        assert!(pack.week.is_match("semana pasada"));
    }

    #[test]
    fn manana_forms() {
        let pack = SpanishPack::new().unwrap();
        // relative day and part of day both match "por la mañana";
        // suppression is decided in the detector.
        assert!(pack.relative_day.is_match("mañana"));
        assert!(pack.part_of_day.is_match("por la mañana"));
        assert!(pack.suppress_relative_day_inside_part_of_day());

        let m = pack.relative_day.find("pasado mañana").unwrap();
        assert_eq!(m.as_str(), "pasado mañana");
        assert!(pack.relative_day_of("pasado mañana").is_none());
    }

    #[test]
    fn time_forms() {
        let pack = SpanishPack::new().unwrap();
        assert!(pack.time_only.is_match("a las 9"));
        assert!(pack.time_only.is_match("a la 1:30"));
        assert!(!pack.time_only.is_match("compra 7 manzanas"));

        let parsed = pack.grammar.parse("9 de la noche").unwrap();
        assert_eq!(parsed.resolve().hour, 21);
    }

    #[test]
    fn between_range() {
        let pack = SpanishPack::new().unwrap();
        let caps = pack.between.captures("entre las 2 y las 4").unwrap();
        assert_eq!(caps.name("a").unwrap().as_str(), "2");
        assert_eq!(caps.name("b").unwrap().as_str(), "4");
    }
}
