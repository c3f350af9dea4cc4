use dashboard_core::{Msg, SortDirection, SortField, SortSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Msg),
    Help,
    Quit,
    Unknown(String),
}

/// Parses one line typed by the operator. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match (verb.as_str(), args.as_slice()) {
        ("r" | "refresh", []) => Command::Intent(Msg::RefreshClicked),
        ("m" | "more", []) => Command::Intent(Msg::LoadMoreClicked),
        ("s" | "sort", [field]) => match SortField::from_name(field) {
            Some(field) => Command::Intent(Msg::SortColumnClicked(field)),
            None => Command::Unknown(line.trim().to_string()),
        },
        ("s" | "sort", [field, direction]) => {
            match (SortField::from_name(field), parse_direction(direction)) {
                (Some(field), Some(direction)) => {
                    Command::Intent(Msg::SortChanged(SortSpec::new(field, direction)))
                }
                _ => Command::Unknown(line.trim().to_string()),
            }
        }
        ("h" | "help" | "?", []) => Command::Help,
        ("q" | "quit" | "exit", []) => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    };
    Some(command)
}

fn parse_direction(raw: &str) -> Option<SortDirection> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Some(SortDirection::Ascending),
        "desc" | "descending" => Some(SortDirection::Descending),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_parse() {
        assert_eq!(
            parse_command(" r "),
            Some(Command::Intent(Msg::RefreshClicked))
        );
        assert_eq!(
            parse_command("MORE"),
            Some(Command::Intent(Msg::LoadMoreClicked))
        );
        assert_eq!(
            parse_command("s category"),
            Some(Command::Intent(Msg::SortColumnClicked(SortField::Category)))
        );
        assert_eq!(
            parse_command("sort time asc"),
            Some(Command::Intent(Msg::SortChanged(SortSpec::new(
                SortField::Timestamp,
                SortDirection::Ascending
            ))))
        );
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("?"), Some(Command::Help));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("s colour"),
            Some(Command::Unknown("s colour".to_string()))
        );
        assert_eq!(
            parse_command("r now"),
            Some(Command::Unknown("r now".to_string()))
        );
    }
}
