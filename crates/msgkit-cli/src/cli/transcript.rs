//! Plain-text rendering of message containers.
//!
//! Each container's flags decide which chrome is printed; message bodies are
//! wrapped to the bubble width and pushed to the left or right edge.

use msgkit_core::constants::MESSAGE_WIDTH_RATIO;
use msgkit_core::models::{GroupFlag, ImageItem, MessageContainer, TimestampFlag};
use msgkit_core::render::missing_renderer_text;
use msgkit_core::{
    Alignment, CustomRendererInfo, LayoutError, Message, MessageKind, RenderDispatcher,
    TimestampFormatter, ViewConfig,
};

/// Columns taken by a profile badge such as `(AL) `
const PROFILE_WIDTH: usize = 5;

pub struct Transcript<'r> {
    config: &'r ViewConfig,
    dispatcher: &'r RenderDispatcher<String>,
    formatter: TimestampFormatter,
}

impl<'r> Transcript<'r> {
    pub fn new(config: &'r ViewConfig, dispatcher: &'r RenderDispatcher<String>) -> Result<Self, LayoutError> {
        Ok(Self {
            config,
            dispatcher,
            formatter: config.timestamp_formatter()?,
        })
    }

    pub fn render(&self, containers: &[MessageContainer<'_>]) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, container) in containers.iter().enumerate() {
            let new_group = container.is_ungrouped() || container.has_flag(GroupFlag::StartGroup);
            if i > 0 && new_group {
                lines.push(String::new());
            }
            self.render_container(container, &mut lines);
        }
        lines
    }

    fn render_container(&self, container: &MessageContainer<'_>, lines: &mut Vec<String>) {
        let message = container.message;
        let timestamp = self.formatter.format(&message.timestamp);
        let swipe_timestamp =
            container.timestamp_flag == TimestampFlag::Normal && self.config.show_timestamp_on_swipe;

        if container.timestamp_flag == TimestampFlag::Top
            || (container.timestamp_flag == TimestampFlag::Normal && !swipe_timestamp)
        {
            lines.push(self.centered(&timestamp));
        }

        let mut body: Vec<String> = if message.is_system() {
            self.wrap(&self.body_text(message))
                .into_iter()
                .map(|line| self.centered(&format!("* {} *", line)))
                .collect()
        } else {
            self.render_bubble(container, lines)
        };

        if swipe_timestamp {
            if let Some(last) = body.last_mut() {
                last.push_str(&format!("  · {}", timestamp));
            }
        }
        lines.append(&mut body);

        if !message.is_system() && container.shows(GroupFlag::RenderFooter) {
            if let Some(footer) = &message.footer {
                let line = self.aligned(message.alignment, footer, &self.profile_space(container));
                lines.push(line);
            }
        }

        if container.timestamp_flag == TimestampFlag::Bottom {
            lines.push(self.centered(&timestamp));
        }
    }

    /// Pushes the header into `lines` and returns the body lines
    fn render_bubble(&self, container: &MessageContainer<'_>, lines: &mut Vec<String>) -> Vec<String> {
        let message = container.message;
        let space = self.profile_space(container);

        if container.shows(GroupFlag::RenderHeader) {
            let header = message.header.as_deref().unwrap_or_else(|| message.display_name());
            lines.push(self.aligned(message.alignment, header, &space));
        }

        let badge = if container.shows(GroupFlag::RenderProfile) {
            profile_badge(message)
        } else {
            space.clone()
        };

        self.wrap(&self.body_text(message))
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let profile = if i == 0 { &badge } else { &space };
                self.aligned(message.alignment, line, profile)
            })
            .collect()
    }

    fn body_text(&self, message: &Message) -> String {
        match &message.kind {
            MessageKind::Text(item) => item.text.clone(),
            MessageKind::System { text } => text.clone(),
            MessageKind::Image(item) => self.image_text(item),
            MessageKind::Custom(item) => {
                let info = CustomRendererInfo::for_width(self.config.width as f32, self.config);
                match self.dispatcher.render_custom(message, &info) {
                    Some(rendered) => rendered.unwrap_or_placeholder(|text| format!("[{}]", text)),
                    None => format!("[{}]", missing_renderer_text(&item.type_id)),
                }
            }
        }
    }

    fn image_text(&self, item: &ImageItem) -> String {
        let source = item.url.as_deref().unwrap_or("inline");
        match (item.width, item.height) {
            (Some(w), Some(h)) => {
                let scale = self.config.image_scale;
                let (w, h) = ((w as f32 * scale).round(), (h as f32 * scale).round());
                format!("[image {}x{}: {}]", w, h, source)
            }
            _ => format!("[image: {}]", source),
        }
    }

    /// Blank space reserved for the avatar, empty when no profile column is drawn
    fn profile_space(&self, container: &MessageContainer<'_>) -> String {
        let reserves = container.shows(GroupFlag::RenderProfile)
            || container.shows(GroupFlag::RenderClearProfile);
        if reserves {
            " ".repeat(PROFILE_WIDTH)
        } else {
            String::new()
        }
    }

    fn bubble_width(&self) -> usize {
        ((self.config.width as f32 * MESSAGE_WIDTH_RATIO) as usize).max(1)
    }

    fn wrap(&self, text: &str) -> Vec<String> {
        wrap_words(text, self.bubble_width())
    }

    fn aligned(&self, alignment: Alignment, text: &str, profile: &str) -> String {
        match alignment {
            Alignment::Left => format!("{}{}", profile, text).trim_end().to_string(),
            Alignment::Right => {
                let profile = mirror(profile);
                let line = format!("{}{}", text, profile);
                format!("{:>width$}", line, width = self.config.width)
                    .trim_end()
                    .to_string()
            }
        }
    }

    fn centered(&self, text: &str) -> String {
        let len = text.chars().count();
        let pad = self.config.width.saturating_sub(len) / 2;
        format!("{}{}", " ".repeat(pad), text)
    }
}

/// Left badge `(AB) ` becomes right badge ` (AB)`
fn mirror(profile: &str) -> String {
    let trimmed = profile.trim_end();
    format!("{:>width$}", trimmed, width = profile.chars().count())
}

fn profile_badge(message: &Message) -> String {
    let initials = match &message.sender {
        Some(sender) => sender.initials(),
        None => message
            .display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default(),
    };
    format!("{:<width$}", format!("({})", initials), width = PROFILE_WIDTH)
}

/// Greedy word wrap; words longer than `max` get a line of their own
pub fn wrap_words(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
