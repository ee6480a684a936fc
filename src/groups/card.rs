use super::Group;

pub const EMPTY_STATE_TITLE: &str = "No groups found";
pub const EMPTY_STATE_HINT: &str =
    "We couldn't find groups for this term. Try something more generic like \"Technology\" or \"Sports\".";
pub const DISCLAIMER: &str =
    "Listings are generated by an AI model and are not verified; invite links may not exist.";

pub const MAX_CARD_TAGS: usize = 3;
pub const MEMBER_COUNT_PLACEHOLDER: &str = "Various";

pub fn results_heading(count: usize) -> String {
    format!("{count} Groups Found")
}

/// `#rust #dev` style tag line of the first [`MAX_CARD_TAGS`] non-blank
/// tags; empty when there are none.
pub fn tag_line(group: &Group) -> String {
    group
        .tags
        .iter()
        .filter(|t| !t.trim().is_empty())
        .take(MAX_CARD_TAGS)
        .map(|t| format!("#{}", t.trim().trim_start_matches('#')))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Category plus member count, e.g. `Technology · 1.2k members`. A missing
/// count shows [`MEMBER_COUNT_PLACEHOLDER`].
pub fn meta_line(group: &Group) -> String {
    let count = match group.member_count.as_deref().map(str::trim) {
        Some(count) if !count.is_empty() => count,
        _ => MEMBER_COUNT_PLACEHOLDER,
    };
    let category = group.category.trim();
    if category.is_empty() {
        format!("{count} members")
    } else {
        format!("{category} · {count} members")
    }
}

/// Plain text rendering of one card, shared by the CLI output and tests.
/// Blank fields are left out rather than printed as empty lines.
pub fn card_lines(group: &Group) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    let name = if group.name.trim().is_empty() {
        "(unnamed group)".to_string()
    } else {
        group.name.clone()
    };
    lines.push(name);
    lines.push(meta_line(group));
    if !group.description.trim().is_empty() {
        lines.push(group.description.clone());
    }
    let tags = tag_line(group);
    if !tags.is_empty() {
        lines.push(tags);
    }
    if let Some(lang) = group.language.as_deref()
        && !lang.trim().is_empty()
    {
        lines.push(format!("Language: {lang}"));
    }
    if !group.invite_link.trim().is_empty() {
        lines.push(group.invite_link.clone());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Group {
        Group {
            id: "1".into(),
            name: "Carros Antigos SP".into(),
            description: "Encontros mensais de carros clássicos.".into(),
            category: "Automóveis".into(),
            member_count: Some("850".into()),
            tags: vec!["carros".into(), "#clássicos".into(), " ".into()],
            invite_link: "https://chat.whatsapp.com/Xy12".into(),
            language: Some("Português".into()),
            ..Group::default()
        }
    }

    #[test]
    fn heading_counts_groups() {
        assert_eq!(results_heading(20), "20 Groups Found");
    }

    #[test]
    fn full_card() {
        assert_eq!(
            card_lines(&sample()),
            vec![
                "Carros Antigos SP",
                "Automóveis · 850 members",
                "Encontros mensais de carros clássicos.",
                "#carros #clássicos",
                "Language: Português",
                "https://chat.whatsapp.com/Xy12",
            ]
        );
    }

    #[test]
    fn sparse_card_skips_blank_fields() {
        let g = Group {
            category: "Jogos".into(),
            ..Group::default()
        };
        assert_eq!(
            card_lines(&g),
            vec!["(unnamed group)", "Jogos · Various members"]
        );
    }

    #[test]
    fn tag_line_keeps_first_three_tags() {
        let g = Group {
            tags: vec!["a".into(), "".into(), "b".into(), "c".into(), "d".into()],
            ..Group::default()
        };
        assert_eq!(tag_line(&g), "#a #b #c");
    }

    #[test]
    fn missing_member_count_uses_placeholder() {
        let mut g = sample();
        g.member_count = None;
        assert_eq!(meta_line(&g), "Automóveis · Various members");
        g.member_count = Some("  ".into());
        assert_eq!(meta_line(&g), "Automóveis · Various members");
    }
}
