//! Event card -> Discord embed rendering
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateEmbed;

use crate::core::response::{truncate_for_embed, truncate_for_field};
use crate::features::notify::EventCard;

/// Build the Discord embed for an event card: title, accent color, description, fields, footer.
pub fn event_embed(card: &EventCard) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed
        .title(&card.title)
        .description(truncate_for_embed(&card.description))
        .color(card.color);

    for field in &card.fields {
        embed.field(&field.name, truncate_for_field(&field.value), field.inline);
    }

    if let Some(footer) = &card.footer {
        embed.footer(|f| f.text(footer));
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notify::card::CardField;

    fn card(footer: Option<&str>) -> EventCard {
        EventCard {
            title: "Design Weekly".to_string(),
            description: "Agenda".to_string(),
            color: 0xf570ff,
            fields: vec![CardField {
                name: "London".to_string(),
                value: "17:00".to_string(),
                inline: true,
            }],
            footer: footer.map(str::to_string),
        }
    }

    #[test]
    fn test_event_embed_contents() {
        let embed = event_embed(&card(Some("Come join us")));

        assert_eq!(embed.0.get("title"), Some(&serde_json::json!("Design Weekly")));
        assert_eq!(embed.0.get("description"), Some(&serde_json::json!("Agenda")));
        assert_eq!(embed.0.get("color"), Some(&serde_json::json!(0xf570ff)));
        assert!(embed.0.contains_key("footer"));
        assert!(embed.0.contains_key("fields"));
    }

    #[test]
    fn test_event_embed_without_footer() {
        let embed = event_embed(&card(None));
        assert!(!embed.0.contains_key("footer"));
    }
}
