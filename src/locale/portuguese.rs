//! Portuguese language pack (Brazilian conventions).

use regex::Regex;

use crate::clock::TimeGrammar;
use crate::pack::{count_occurrences, fold, LanguagePack, PackError, WeekdayTable};
use crate::token::{DurationUnit, PartOfDay, RelativeDay};

use super::compile;

const WEEKDAYS: &str = "segunda-feira|ter[çc]a-feira|quarta-feira|quinta-feira|sexta-feira|segunda|ter[çc]a|quarta|quinta|sexta|s[áa]bado|domingo|seg|ter|qua|qui|sex|s[áa]b|dom";

/// Endpoint: "9", "9:30", "15h", "15h30", optionally "… da noite".
const ENDPOINT: &str =
    r"\d{1,2}(?::\d{2})?(?:\s*(?:hrs|hs|h)(?:\d{2})?)?(?:\s+da\s+(?:manh[ãa]|tarde|noite))?\b";

const UNITS: &str = "minutos|minuto|min|horas|hora|h|dias|dia|semanas|semana|meses|m[êe]s";

const THIS_WORDS: &[&str] = &["esta", "este", "nesta", "neste", "essa", "esse"];
const NEXT_WORDS: &[&str] = &["próxima", "próximo", "que vem", "seguinte"];
const LAST_WORDS: &[&str] = &["passada", "passado", "última", "último", "anterior"];

pub struct PortuguesePack {
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

impl PortuguesePack {
    pub fn new() -> Result<Self, PackError> {
        let weekdays = WeekdayTable::from_names([
            "domingo",
            "segunda-feira",
            "terça-feira",
            "quarta-feira",
            "quinta-feira",
            "sexta-feira",
            "sábado",
        ])
        .alias("dom", 1)
        .alias("seg", 2)
        .alias("segunda", 2)
        .alias("ter", 3)
        .alias("terça", 3)
        .alias("qua", 4)
        .alias("quarta", 4)
        .alias("qui", 5)
        .alias("quinta", 5)
        .alias("sex", 6)
        .alias("sexta", 6)
        .alias("sáb", 7);

        let grammar = TimeGrammar::new(
            &["da manhã", "da manha"],
            &["da tarde", "da noite"],
            &["meio-dia"],
            &["meia-noite"],
        )
        .map_err(|e| PackError::pattern("time grammar", e))?;

        Ok(Self {
            weekdays,
            grammar,
            weekday: compile(
                "weekday",
                &format!(
                    r"(?i)\b(?:(?P<modifier>pr[óo]xim[ao]|nest[ae]|ness[ae]|est[ae]|ess[ae]|[úu]ltim[ao])\s+)?(?P<weekday>{WEEKDAYS})(?:\s+(?P<postmod>que\s+vem|passad[ao]|seguinte))?\b"
                ),
            )?,
            week: compile(
                "week",
                r"(?i)\b(?:(?P<prefix>(?:pr[óo]xima\s+|esta\s+|essa\s+|nesta\s+|[úu]ltima\s+)+)semana|(?:a\s+)?semana\s+(?P<post>que\s+vem|passada|seguinte))\b",
            )?,
            bare_week: compile("bare week", r"(?i)\b(?:minha|a)\s+semana\b")?,
            weekend: compile(
                "weekend",
                r"(?i)\b(?:(?P<modifier>pr[óo]ximo|este|neste|no)\s+)?(?:fim|final)\s+de\s+semana(?:\s+(?P<post>que\s+vem))?\b",
            )?,
            relative_day: compile(
                "relative day",
                r"(?i)\bhoje\s+[àa]\s+noite\b|\besta\s+noite\b|\bhoje\b|\bamanh[ãa]\b|\bontem\b",
            )?,
            part_of_day: compile(
                "part of day",
                r"(?i)\b(?:de|pela|da|na|[àa])\s+(?P<word>manh[ãa]|tarde|noite)\b|\b(?P<word2>madrugada|meio-dia|meia-noite)\b",
            )?,
            ordinal_day: compile(
                "ordinal day",
                r"(?i)\b(?:no\s+)?dia\s+(?P<day>\d{1,2})\b|\b(?P<day2>\d{1,2})[ºo°]",
            )?,
            weekday_time: compile(
                "weekday time",
                &format!(
                    r"(?i)\b(?P<wd>{WEEKDAYS})\s+(?:[àa]s\s+)?(?P<t1>{ENDPOINT})(?:\s*(?:-|at[ée]|[àa]s)\s*(?P<t2>{ENDPOINT}))?"
                ),
            )?,
            from_to: compile(
                "from-to range",
                &format!(
                    r"(?i)\b(?:(?P<wd>{WEEKDAYS})\s+)?(?P<range>d(?:as|e|o)?\s+(?P<a>{ENDPOINT})\s+(?:at[ée]|[àa]s?)\s+(?P<b>{ENDPOINT}))"
                ),
            )?,
            between: compile(
                "between range",
                &format!(
                    r"(?i)\b(?:(?P<wd>{WEEKDAYS})\s+)?(?P<range>entre\s+(?P<a>{ENDPOINT})\s+e\s+(?P<b>{ENDPOINT}))"
                ),
            )?,
            time_only: compile(
                "time only",
                &format!(
                    r"(?i)\b(?P<word>meio-dia|meia-noite)\b|\b[àa]s\s+(?P<cued>{ENDPOINT})|\b(?P<time>(?:\d{{1,2}}:\d{{2}}|\d{{1,2}}(?:hrs|hs|h)(?:\d{{2}})?)(?:\s+da\s+(?:manh[ãa]|tarde|noite))?)\b"
                ),
            )?,
            in_duration: compile(
                "in-duration",
                &format!(
                    r"(?i)\b(?:daqui\s+a|dentro\s+de|em)\s+(?P<value>\d+)\s*(?P<unit>{UNITS})\b"
                ),
            )?,
            by_duration: compile(
                "by-duration",
                &format!(r"(?i)\bpor\s+(?P<value>\d+)\s*(?P<unit>{UNITS})\b"),
            )?,
            article_duration: compile(
                "article duration",
                r"(?i)\bdaqui\s+a\s+(?:um|uma)\s+(?P<unit>minuto|hora|dia|semana|m[êe]s)\b",
            )?,
            connector: compile("connector", r"(?i)\bàs\b")?,
            command_prefix: compile(
                "command prefix",
                r"(?i)^\s*(?:por\s+favor,?\s+)?(?:me\s+lembra(?:r)?\s+de|lembrar?\s+de|lembre-me\s+de|agendar?|marcar?|criar?|adiar?|remarcar?|mostrar?|cancelar?)\b\s*",
            )?,
        })
    }
}

impl LanguagePack for PortuguesePack {
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
            "hoje a noite" | "esta noite" => Some(RelativeDay::Tonight),
            "hoje" => Some(RelativeDay::Today),
            "amanha" => Some(RelativeDay::Tomorrow),
            "ontem" => Some(RelativeDay::Yesterday),
            _ => None,
        }
    }

    fn part_of_day_of(&self, word: &str) -> Option<PartOfDay> {
        match fold(word.trim()).as_str() {
            "manha" => Some(PartOfDay::Morning),
            "tarde" => Some(PartOfDay::Afternoon),
            "noite" => Some(PartOfDay::Night),
            "madrugada" => Some(PartOfDay::Night),
            "meio-dia" => Some(PartOfDay::Noon),
            "meia-noite" => Some(PartOfDay::Midnight),
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

    fn next_repetition_count(&self, phrase: &str) -> u32 {
        count_occurrences(phrase, NEXT_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_postfix_modifier() {
        let pack = PortuguesePack::new().unwrap();
        let caps = pack.weekday.captures("sexta que vem").unwrap();
        assert_eq!(caps.name("weekday").unwrap().as_str(), "sexta");
        assert_eq!(caps.name("postmod").unwrap().as_str(), "que vem");
    }

    #[test]
    fn week_phrase_variants() {
        let pack = PortuguesePack::new().unwrap();
        assert!(pack.week.is_match("próxima semana"));
        assert!(pack.week.is_match("semana que vem"));
        assert!(pack.week.is_match("semana passada"));
        assert_eq!(pack.next_repetition_count("próxima próxima semana"), 2);
        assert_eq!(pack.next_repetition_count("proxima semana"), 1);
    }

    #[test]
    fn time_forms() {
        let pack = PortuguesePack::new().unwrap();
        assert!(pack.time_only.is_match("às 15h"));
        assert!(pack.time_only.is_match("15h30"));
        assert!(!pack.time_only.is_match("dia 24"));

        let parsed = pack.grammar.parse("9 da noite").unwrap();
        assert_eq!(parsed.resolve().hour, 21);
    }

    #[test]
    fn ordinal_day_forms() {
        let pack = PortuguesePack::new().unwrap();
        assert!(pack.ordinal_day.is_match("dia 24"));
        assert!(pack.ordinal_day.is_match("no dia 3"));
        assert!(pack.ordinal_day.is_match("11º"));
    }

    #[test]
    fn weekend_phrases() {
        let pack = PortuguesePack::new().unwrap();
        assert!(pack.weekend.is_match("fim de semana"));
        assert!(pack.weekend.is_match("próximo final de semana"));
        assert!(pack.signals_next("fim de semana que vem"));
    }
}
