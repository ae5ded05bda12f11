//! Card widgets and their visual state.

use compact_str::CompactString;

use posterwall_core::{ItemFlags, ItemModel, ThumbnailSource};

/// Corner badge shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    /// Released recently.
    NewRelease,
    /// Releasing soon.
    SoonRelease,
    /// Already watched.
    Watched,
}

impl Badge {
    /// Short label for text rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewRelease => "NEW",
            Self::SoonRelease => "SOON",
            Self::Watched => "SEEN",
        }
    }
}

/// Badge contrast against the poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeTone {
    /// Light badge, used on dark posters.
    #[default]
    Light,
    /// Dark badge, used on light posters.
    Dark,
}

/// Everything a card needs to draw one item.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVisual {
    pub title: CompactString,
    pub year: Option<i32>,
    pub status: Option<CompactString>,
    pub badge: Option<Badge>,
    pub tone: BadgeTone,
    /// Badge pulses to signal a recent change.
    pub pulse: bool,
    pub thumbnail: ThumbnailSource,
}

impl CardVisual {
    /// Derive the visual state for `model`.
    pub fn from_model(model: &ItemModel) -> Self {
        let badge = badge_for(&model.flags);
        let thumbnail = model.thumbnail.source();

        Self {
            title: model.title.clone(),
            year: model.year(),
            status: model.status.clone(),
            badge,
            tone: if model.flags.light_poster {
                BadgeTone::Dark
            } else {
                BadgeTone::Light
            },
            pulse: badge.is_some() && model.flags.recent_change,
            thumbnail,
        }
    }
}

/// Release badges need notifications on; a new release wins over a soon
/// release, and the watched badge only shows when no release badge does.
fn badge_for(flags: &ItemFlags) -> Option<Badge> {
    let release = if !flags.notifications {
        None
    } else if flags.new_release {
        Some(Badge::NewRelease)
    } else if flags.soon_release {
        Some(Badge::SoonRelease)
    } else {
        None
    };

    release.or(flags.watched.then_some(Badge::Watched))
}

/// A reusable visual element that presents one item at a time.
///
/// Slots are created once when the pool is built and are rebound as the
/// visible window moves.
pub trait SlotWidget {
    /// Construct an unbound widget.
    fn create() -> Self
    where
        Self: Sized;

    /// Present `model`.
    fn bind(&mut self, model: &ItemModel, visual: &CardVisual);

    /// Return to the blank state.
    fn unbind(&mut self);
}

/// Headless widget that records what it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct ShellWidget {
    visual: Option<CardVisual>,
    binds: usize,
    unbinds: usize,
}

impl ShellWidget {
    /// Currently presented visual.
    pub fn visual(&self) -> Option<&CardVisual> {
        self.visual.as_ref()
    }

    /// Times this widget was bound.
    pub fn binds(&self) -> usize {
        self.binds
    }

    /// Times this widget was unbound.
    pub fn unbinds(&self) -> usize {
        self.unbinds
    }
}

impl SlotWidget for ShellWidget {
    fn create() -> Self {
        Self::default()
    }

    fn bind(&mut self, _model: &ItemModel, visual: &CardVisual) {
        self.visual = Some(visual.clone());
        self.binds += 1;
    }

    fn unbind(&mut self) {
        self.visual = None;
        self.unbinds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use posterwall_core::{ItemId, MediaKind, SortKey, ThumbnailRef};

    fn model(flags: ItemFlags, thumb: &str) -> ItemModel {
        ItemModel::new(
            ItemId::new(1),
            "Dune",
            SortKey::new("2021"),
            ThumbnailRef::new(thumb),
            MediaKind::Movie,
        )
        .with_release_date(NaiveDate::from_ymd_opt(2021, 10, 22).unwrap())
        .with_flags(flags)
    }

    #[test]
    fn test_new_release_beats_soon_release() {
        let flags = ItemFlags {
            notifications: true,
            new_release: true,
            soon_release: true,
            watched: true,
            ..Default::default()
        };
        let visual = CardVisual::from_model(&model(flags, "/p.jpg"));
        assert_eq!(visual.badge, Some(Badge::NewRelease));
        assert_eq!(visual.year, Some(2021));
    }

    #[test]
    fn test_release_badges_need_notifications() {
        let flags = ItemFlags {
            new_release: true,
            watched: true,
            ..Default::default()
        };
        let visual = CardVisual::from_model(&model(flags, "/p.jpg"));
        assert_eq!(visual.badge, Some(Badge::Watched));
    }

    #[test]
    fn test_tone_and_pulse() {
        let flags = ItemFlags {
            notifications: true,
            soon_release: true,
            recent_change: true,
            light_poster: true,
            ..Default::default()
        };
        let visual = CardVisual::from_model(&model(flags, "/p.jpg"));
        assert_eq!(visual.badge, Some(Badge::SoonRelease));
        assert_eq!(visual.tone, BadgeTone::Dark);
        assert!(visual.pulse);

        let plain = CardVisual::from_model(&model(
            ItemFlags {
                recent_change: true,
                ..Default::default()
            },
            "/p.jpg",
        ));
        assert_eq!(plain.badge, None);
        assert!(!plain.pulse);
    }

    #[test]
    fn test_thumbnail_classified() {
        let file = CardVisual::from_model(&model(ItemFlags::default(), "/p.jpg"));
        assert_eq!(file.thumbnail, ThumbnailSource::File);

        let embedded = CardVisual::from_model(&model(ItemFlags::default(), "resource://blank"));
        assert_eq!(embedded.thumbnail, ThumbnailSource::Embedded);

        let missing = CardVisual::from_model(&model(ItemFlags::default(), ""));
        assert_eq!(missing.thumbnail, ThumbnailSource::Missing);
    }

    #[test]
    fn test_shell_widget_counts() {
        let mut widget = ShellWidget::create();
        let item = model(ItemFlags::default(), "");
        widget.bind(&item, &CardVisual::from_model(&item));
        assert_eq!(widget.visual().map(|v| v.title.as_str()), Some("Dune"));
        widget.unbind();
        assert!(widget.visual().is_none());
        assert_eq!((widget.binds(), widget.unbinds()), (1, 1));
    }
}
