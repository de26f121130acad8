use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Resolve a stored language tag to the grammar used for highlighting.
/// Unknown tags pass through lowercased and fall back to plain rendering.
pub fn grammar_for(language: &str) -> String {
    let tag = language.trim().to_lowercase();
    let grammar = match tag.as_str() {
        "sh" | "zsh" | "bash" => "bash",
        "ps1" | "powershell" => "powershell",
        "cs" | "csharp" => "csharp",
        "js" | "javascript" => "javascript",
        "ts" | "typescript" => "typescript",
        "html" => "markup",
        _ => return tag,
    };
    grammar.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Keyword,
    Variable,
    Flag,
    Plain,
}

impl TokenKind {
    pub fn style(self) -> Style {
        match self {
            TokenKind::Comment => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            TokenKind::String => Style::default().fg(Color::Green),
            TokenKind::Number => Style::default().fg(Color::Magenta),
            TokenKind::Keyword => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            TokenKind::Variable => Style::default().fg(Color::Yellow),
            TokenKind::Flag => Style::default().fg(Color::LightBlue),
            TokenKind::Plain => Style::default().fg(Color::White),
        }
    }
}

struct Grammar {
    line_comment: Option<&'static str>,
    keywords: &'static [&'static str],
    case_insensitive: bool,
    variables: bool,
    flags: bool,
    backtick_strings: bool,
}

const PLAIN: Grammar = Grammar {
    line_comment: None,
    keywords: &[],
    case_insensitive: false,
    variables: false,
    flags: false,
    backtick_strings: false,
};

fn grammar(name: &str) -> Grammar {
    match name {
        "bash" => Grammar {
            line_comment: Some("#"),
            keywords: &[
                "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done",
                "case", "esac", "in", "function", "return", "export", "local", "sudo", "echo",
                "exit",
            ],
            variables: true,
            flags: true,
            ..PLAIN
        },
        "powershell" => Grammar {
            line_comment: Some("#"),
            keywords: &[
                "if", "else", "elseif", "foreach", "for", "while", "do", "function", "param",
                "return", "try", "catch", "finally", "switch", "in",
            ],
            case_insensitive: true,
            variables: true,
            flags: true,
            ..PLAIN
        },
        "python" => Grammar {
            line_comment: Some("#"),
            keywords: &[
                "def", "class", "import", "from", "as", "if", "elif", "else", "for", "while",
                "in", "return", "with", "try", "except", "finally", "lambda", "None", "True",
                "False", "and", "or", "not", "pass", "yield",
            ],
            ..PLAIN
        },
        "csharp" | "java" => Grammar {
            line_comment: Some("//"),
            keywords: &[
                "using", "import", "package", "namespace", "class", "public", "private",
                "protected", "static", "void", "new", "return", "if", "else", "for", "foreach",
                "while", "var", "int", "string", "bool", "true", "false", "null", "try",
                "catch", "finally", "async", "await", "final",
            ],
            ..PLAIN
        },
        "javascript" | "typescript" => Grammar {
            line_comment: Some("//"),
            keywords: &[
                "const", "let", "var", "function", "return", "if", "else", "for", "while",
                "import", "from", "export", "default", "async", "await", "new", "class",
                "true", "false", "null", "undefined", "interface", "type",
            ],
            backtick_strings: true,
            ..PLAIN
        },
        "sql" => Grammar {
            line_comment: Some("--"),
            keywords: &[
                "select", "from", "where", "insert", "into", "values", "update", "set",
                "delete", "create", "table", "drop", "alter", "join", "left", "inner", "on",
                "and", "or", "not", "null", "order", "by", "group", "limit", "as",
            ],
            case_insensitive: true,
            ..PLAIN
        },
        _ => PLAIN,
    }
}

/// Split one line into classified tokens
pub fn tokenize<'a>(line: &'a str, grammar_name: &str) -> Vec<(TokenKind, &'a str)> {
    let grammar = grammar(grammar_name);
    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    let bytes = line.as_bytes();

    let flush = |tokens: &mut Vec<(TokenKind, &'a str)>, from: usize, to: usize| {
        if from < to {
            tokens.push((TokenKind::Plain, &line[from..to]));
        }
    };

    while i < line.len() {
        let rest = &line[i..];
        let at_word_start = !line[..i].chars().next_back().is_some_and(is_word_char);

        if let Some(prefix) = grammar.line_comment {
            if rest.starts_with(prefix) && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
                flush(&mut tokens, plain_start, i);
                tokens.push((TokenKind::Comment, rest));
                return tokens;
            }
        }

        let ch = match rest.chars().next() {
            Some(ch) => ch,
            None => break,
        };

        let token = if ch == '"' || ch == '\'' || (ch == '`' && grammar.backtick_strings) {
            Some((TokenKind::String, quoted_len(rest, ch)))
        } else if grammar.variables && ch == '$' && rest.len() > 1 {
            Some((TokenKind::Variable, variable_len(rest)))
        } else if grammar.flags
            && ch == '-'
            && (i == 0 || bytes[i - 1].is_ascii_whitespace())
            && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic() || c == '-')
        {
            Some((TokenKind::Flag, word_len(rest, |c| is_word_char(c) || c == '-')))
        } else if ch.is_ascii_digit() && at_word_start {
            Some((TokenKind::Number, word_len(rest, |c| c.is_ascii_alphanumeric() || c == '.')))
        } else if is_word_char(ch) && at_word_start {
            let len = word_len(rest, is_word_char);
            let word = &rest[..len];
            let keyword = grammar.keywords.iter().any(|k| {
                if grammar.case_insensitive {
                    k.eq_ignore_ascii_case(word)
                } else {
                    *k == word
                }
            });
            if keyword {
                Some((TokenKind::Keyword, len))
            } else {
                i += len;
                continue;
            }
        } else {
            None
        };

        match token {
            Some((kind, len)) => {
                flush(&mut tokens, plain_start, i);
                tokens.push((kind, &line[i..i + len]));
                i += len;
                plain_start = i;
            }
            None => i += ch.len_utf8(),
        }
    }

    flush(&mut tokens, plain_start, line.len());
    tokens
}

/// Render a snippet into styled lines for the detail view
pub fn highlight(code: &str, language: &str) -> Vec<Line<'static>> {
    let grammar_name = grammar_for(language);
    code.lines()
        .map(|line| {
            let spans: Vec<Span<'static>> = tokenize(line, &grammar_name)
                .into_iter()
                .map(|(kind, text)| Span::styled(text.to_string(), kind.style()))
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn word_len(text: &str, keep: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|(_, c)| !keep(*c))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Length of a quoted string starting at `text[0]`, unterminated strings run to end of line
fn quoted_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (idx, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' && quote != '\'' {
            escaped = true;
        } else if c == quote {
            return idx + c.len_utf8();
        }
    }
    text.len()
}

fn variable_len(text: &str) -> usize {
    let body = &text[1..];
    if body.starts_with('{') {
        return body.find('}').map(|end| end + 2).unwrap_or(text.len());
    }
    let len = word_len(body, |c| is_word_char(c) || c == ':');
    if len == 0 {
        1
    } else {
        len + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(line: &str, grammar: &str) -> Vec<(TokenKind, String)> {
        tokenize(line, grammar)
            .into_iter()
            .filter(|(kind, _)| *kind != TokenKind::Plain)
            .map(|(kind, text)| (kind, text.to_string()))
            .collect()
    }

    #[test]
    fn test_grammar_aliases() {
        assert_eq!(grammar_for("sh"), "bash");
        assert_eq!(grammar_for("zsh"), "bash");
        assert_eq!(grammar_for("ps1"), "powershell");
        assert_eq!(grammar_for("cs"), "csharp");
        assert_eq!(grammar_for("js"), "javascript");
        assert_eq!(grammar_for("ts"), "typescript");
        assert_eq!(grammar_for("html"), "markup");
        assert_eq!(grammar_for("sql"), "sql");
        assert_eq!(grammar_for("Rust"), "rust");
    }

    #[test]
    fn test_bash_tokens() {
        let tokens = kinds("docker ps --all -q $HOME \"x y\" # list", "bash");

        assert_eq!(
            tokens,
            vec![
                (TokenKind::Flag, "--all".to_string()),
                (TokenKind::Flag, "-q".to_string()),
                (TokenKind::Variable, "$HOME".to_string()),
                (TokenKind::String, "\"x y\"".to_string()),
                (TokenKind::Comment, "# list".to_string()),
            ]
        );
    }

    #[test]
    fn test_hyphenated_word_is_not_a_flag() {
        let tokens = kinds("apt-get install", "bash");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_sql_keywords_are_case_insensitive() {
        let tokens = kinds("SELECT id FROM users LIMIT 10", "sql");

        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "SELECT".to_string()),
                (TokenKind::Keyword, "FROM".to_string()),
                (TokenKind::Keyword, "LIMIT".to_string()),
                (TokenKind::Number, "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokens_cover_whole_line() {
        let line = "const x = `a ${b}`; // done";
        let joined: String = tokenize(line, "javascript")
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(joined, line);
    }

    #[test]
    fn test_unknown_language_renders_plain() {
        let lines = highlight("fn main() {}\nlet x = 1;", "rust");

        assert_eq!(lines.len(), 2);
        assert!(lines[0]
            .spans
            .iter()
            .all(|span| span.style == TokenKind::Plain.style()));
    }
}
