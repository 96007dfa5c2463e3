use carenova_types::{AnalysisResult, SeverityLevel};
use yansi::{Color, Paint, Style};

use crate::domain::models::{Author, Message, MessageType, Prompt, Stage};

#[derive(Clone, Copy)]
enum Tag {
    Break,
    Bold(bool),
    Italic(bool),
    Paragraph(bool),
}

const TAGS: &[(&str, Tag)] = &[
    ("<br>", Tag::Break),
    ("<br/>", Tag::Break),
    ("<br />", Tag::Break),
    ("<strong>", Tag::Bold(true)),
    ("</strong>", Tag::Bold(false)),
    ("<b>", Tag::Bold(true)),
    ("</b>", Tag::Bold(false)),
    ("<em>", Tag::Italic(true)),
    ("</em>", Tag::Italic(false)),
    ("<i>", Tag::Italic(true)),
    ("</i>", Tag::Italic(false)),
    ("<p>", Tag::Paragraph(true)),
    ("</p>", Tag::Paragraph(false)),
];

fn match_tag(text: &str) -> Option<(Tag, usize)> {
    TAGS.iter().find_map(|(name, tag)| {
        let candidate = text.get(..name.len())?;
        if candidate.eq_ignore_ascii_case(name) {
            return Some((*tag, name.len()));
        }
        None
    })
}

fn flush_segment(out: &mut String, segment: &mut String, bold: bool, italic: bool) {
    if segment.is_empty() {
        return;
    }

    let mut style = Style::default();
    if bold {
        style = style.bold();
    }
    if italic {
        style = style.italic();
    }

    out.push_str(&style.paint(segment.as_str()).to_string());
    segment.clear();
}

/// Render the small formatting subset chat content uses as terminal text.
///
/// Line breaks, paragraphs, bold and italic tags are translated; any other
/// markup is printed verbatim.
pub fn render_markup(text: &str) -> String {
    let mut out = String::new();
    let mut segment = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut rest = text;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            if let Some((tag, len)) = match_tag(rest) {
                flush_segment(&mut out, &mut segment, bold, italic);
                match tag {
                    Tag::Break => out.push('\n'),
                    Tag::Bold(on) => bold = on,
                    Tag::Italic(on) => italic = on,
                    Tag::Paragraph(false) => out.push('\n'),
                    Tag::Paragraph(true) => {}
                }
                rest = &rest[len..];
                continue;
            }
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            segment.push(ch);
        }
        rest = chars.as_str();
    }

    flush_segment(&mut out, &mut segment, bold, italic);
    out.trim_end_matches('\n').to_string()
}

/// A chat bubble as printable lines: avatar on the first line, continuation
/// lines indented under it.
pub fn format_message(message: &Message) -> String {
    let body = render_markup(&message.text);
    let style = match (message.author, message.message_type()) {
        (_, MessageType::Error) => Style::new(Color::Red),
        (_, MessageType::Status) => Style::default().dimmed(),
        (Author::User, MessageType::Normal) => Style::new(Color::Cyan),
        (Author::Carenova, MessageType::Normal) => Style::default(),
    };

    body.lines()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 {
                format!("{} ", message.author.avatar())
            } else {
                "   ".to_string()
            };
            format!("{prefix}{}", style.paint(line))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn severity_style(level: SeverityLevel) -> Style {
    match level {
        SeverityLevel::Mild => Style::new(Color::Green).bold(),
        SeverityLevel::Moderate => Style::new(Color::Yellow).bold(),
        SeverityLevel::Severe => Style::new(Color::Red).bold(),
        SeverityLevel::Unknown => Style::default().bold(),
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    lines.push(String::new());
    lines.push(Paint::new(title).bold().to_string());
    for item in items {
        lines.push(format!("  • {}", render_markup(item)));
    }
}

pub fn format_analysis(result: &AnalysisResult) -> Vec<String> {
    let badge = severity_style(result.severity_level()).paint(format!("{} Severity", result.severity));
    let mut lines = vec![format!("{badge}    Confidence: {}", result.confidence)];

    push_section(&mut lines, "🔍 Possible Conditions", &result.possible_conditions);
    if !result.explanation.is_empty() {
        push_section(&mut lines, "💡 Why These Conditions", &result.explanation);
    }
    push_section(&mut lines, "🏠 What May Help", &result.home_care_tips);
    push_section(&mut lines, "🚨 See a Doctor If", &result.when_to_see_doctor);

    lines.push(String::new());
    lines.push(
        Paint::new(format!("⚠️  {}", render_markup(&result.disclaimer)))
            .italic()
            .to_string(),
    );

    lines
}

pub fn connection_label(connected: bool) -> String {
    if connected {
        Paint::green("● Connected").to_string()
    } else {
        Paint::red("● Disconnected").to_string()
    }
}

pub fn stage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::Initial => "Describe your symptoms",
        Stage::Followup => "A few follow-up questions",
        Stage::Results => "Your results",
    }
}

pub fn prompt_label(prompt: &Prompt) -> Option<String> {
    match prompt {
        Prompt::Symptoms => Some("How are you feeling? (at least 5 characters)".to_string()),
        Prompt::Answer {
            index,
            total,
            question,
        } => Some(format!("[{}/{}] {}", index + 1, total, question)),
        Prompt::Commands => None,
    }
}
