//! Identifier types and composite identifier codecs.
//!
//! Content rows are keyed by opaque string ids (uuids in practice).  The
//! engine additionally passes around *composite* ids that pack a kind tag and
//! two content ids into one delimited string:
//!
//! | Type                    | Wire format                               |
//! |-------------------------|-------------------------------------------|
//! | [`BehaviorTargetId`]    | `{kind}_{behaviorId}_{behaviorActionId}`  |
//! | [`InteractionTargetId`] | `{source}_{interactionId}_{actionId}`     |
//! | [`FulfillmentTargetId`] | `{kind}_{subjectId}_{interactionId}`      |
//! | [`EntityId`]            | `{type}-{uuid}`                           |
//!
//! Decoding is a positional split with no escaping.  An id embedded in a
//! composite must not itself contain the delimiter; [`is_delimiter_safe`]
//! lets loaders reject such ids up front.  Entity ids split on the *first*
//! `-` only, so the uuid part keeps its own hyphens.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Delimiter for behavior-target, interaction-target and fulfillment ids.
pub const COMPOSITE_DELIMITER: char = '_';

/// Delimiter between an entity's type tag and its uuid.
pub const ENTITY_DELIMITER: char = '-';

/// `true` if `segment` can be embedded in a `_`-delimited composite id.
#[inline]
pub fn is_delimiter_safe(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(COMPOSITE_DELIMITER)
}

// ── Plain content ids ─────────────────────────────────────────────────────────

/// Generate a string-backed content id newtype.
macro_rules! content_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }
    };
}

content_id! {
    /// Primary key of an authored behavior.
    pub struct BehaviorId;
}

content_id! {
    /// Primary key of one step in a behavior's action graph.
    pub struct BehaviorActionId;
}

content_id! {
    /// Primary key of an authored interaction.
    pub struct InteractionId;
}

content_id! {
    /// Primary key of one executable step of an interaction.
    pub struct InteractionActionId;
}

content_id! {
    /// Primary key of a character need (hunger, rest, …).
    pub struct NeedId;
}

content_id! {
    /// Primary key of a building condition (durability, cleanliness, …).
    pub struct ConditionId;
}

content_id! {
    /// Item template (the authored "apple", not a placed apple).
    pub struct ItemTemplateId;
}

content_id! {
    /// Building template (the authored "well", not a placed well).
    pub struct BuildingTemplateId;
}

// ── Kind tags ─────────────────────────────────────────────────────────────────

/// Generate a closed enum with a stable lowercase wire code.
macro_rules! code_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(code: &str) -> CoreResult<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(CoreError::UnknownCode {
                        what: stringify!($name),
                        code: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

code_enum! {
    /// What kind of goal a behavior pursues.
    pub enum BehaviorKind {
        Need      => "need",
        Condition => "condition",
        Idle      => "idle",
    }
}

code_enum! {
    /// Which kind of entity offers an interaction.
    pub enum InteractionSource {
        Item      => "item",
        Building  => "building",
        Character => "character",
        System    => "system",
    }
}

code_enum! {
    /// Whether a fulfillment raises a character need or a building condition.
    pub enum FulfillmentKind {
        Need      => "need",
        Condition => "condition",
    }
}

code_enum! {
    /// Type tag of a world entity.
    pub enum EntityKind {
        Character => "character",
        Item      => "item",
        Building  => "building",
    }
}

// ── Composite codecs ──────────────────────────────────────────────────────────

/// Split `raw` into exactly three `_`-delimited, non-empty segments.
fn split3<'a>(what: &'static str, raw: &'a str) -> CoreResult<[&'a str; 3]> {
    let mut parts = raw.split(COMPOSITE_DELIMITER);
    let (Some(a), Some(b), Some(c), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CoreError::MalformedId {
            what,
            raw: raw.to_owned(),
            reason: "expected exactly three '_'-separated segments",
        });
    };
    if a.is_empty() || b.is_empty() || c.is_empty() {
        return Err(CoreError::MalformedId {
            what,
            raw: raw.to_owned(),
            reason: "empty segment",
        });
    }
    Ok([a, b, c])
}

/// Identifies the active behavior + behavior-action pair of a character.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct BehaviorTargetId {
    pub kind:      BehaviorKind,
    pub behavior:  BehaviorId,
    pub action:    BehaviorActionId,
}

impl BehaviorTargetId {
    pub fn new(kind: BehaviorKind, behavior: BehaviorId, action: BehaviorActionId) -> Self {
        Self { kind, behavior, action }
    }

    pub fn encode(&self) -> String {
        format!("{}_{}_{}", self.kind, self.behavior, self.action)
    }

    pub fn decode(raw: &str) -> CoreResult<Self> {
        let [kind, behavior, action] = split3("behavior-target", raw)?;
        Ok(Self {
            kind:     kind.parse()?,
            behavior: BehaviorId::new(behavior),
            action:   BehaviorActionId::new(action),
        })
    }
}

/// Identifies one interaction action queued for execution.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct InteractionTargetId {
    pub source:      InteractionSource,
    pub interaction: InteractionId,
    pub action:      InteractionActionId,
}

impl InteractionTargetId {
    pub fn new(source: InteractionSource, interaction: InteractionId, action: InteractionActionId) -> Self {
        Self { source, interaction, action }
    }

    pub fn encode(&self) -> String {
        format!("{}_{}_{}", self.source, self.interaction, self.action)
    }

    pub fn decode(raw: &str) -> CoreResult<Self> {
        let [source, interaction, action] = split3("interaction-target", raw)?;
        Ok(Self {
            source:      source.parse()?,
            interaction: InteractionId::new(interaction),
            action:      InteractionActionId::new(action),
        })
    }
}

/// Identifies a fulfillment edge: which need/condition an interaction raises.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FulfillmentTargetId {
    pub kind:        FulfillmentKind,
    /// A `NeedId` or `ConditionId` depending on `kind`.
    pub subject:     String,
    pub interaction: InteractionId,
}

impl FulfillmentTargetId {
    pub fn new(kind: FulfillmentKind, subject: impl Into<String>, interaction: InteractionId) -> Self {
        Self { kind, subject: subject.into(), interaction }
    }

    pub fn encode(&self) -> String {
        format!("{}_{}_{}", self.kind, self.subject, self.interaction)
    }

    pub fn decode(raw: &str) -> CoreResult<Self> {
        let [kind, subject, interaction] = split3("fulfillment", raw)?;
        Ok(Self {
            kind:        kind.parse()?,
            subject:     subject.to_owned(),
            interaction: InteractionId::new(interaction),
        })
    }
}

/// A placed world entity: `{type}-{uuid}`.
///
/// Ordering is by kind, then uuid, which gives the world store a stable
/// enumeration order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct EntityId {
    pub kind: EntityKind,
    pub uuid: String,
}

impl EntityId {
    pub fn new(kind: EntityKind, uuid: impl Into<String>) -> Self {
        Self { kind, uuid: uuid.into() }
    }

    pub fn character(uuid: impl Into<String>) -> Self {
        Self::new(EntityKind::Character, uuid)
    }

    pub fn item(uuid: impl Into<String>) -> Self {
        Self::new(EntityKind::Item, uuid)
    }

    pub fn building(uuid: impl Into<String>) -> Self {
        Self::new(EntityKind::Building, uuid)
    }

    pub fn encode(&self) -> String {
        format!("{}-{}", self.kind, self.uuid)
    }

    pub fn decode(raw: &str) -> CoreResult<Self> {
        let Some((kind, uuid)) = raw.split_once(ENTITY_DELIMITER) else {
            return Err(CoreError::MalformedId {
                what:   "entity",
                raw:    raw.to_owned(),
                reason: "missing '-' after type tag",
            });
        };
        if uuid.is_empty() {
            return Err(CoreError::MalformedId {
                what:   "entity",
                raw:    raw.to_owned(),
                reason: "empty uuid",
            });
        }
        Ok(Self { kind: kind.parse()?, uuid: uuid.to_owned() })
    }
}

// ── Display / FromStr / String conversions ────────────────────────────────────

macro_rules! codec_traits {
    ($($name:ident),+) => {$(
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.encode())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(raw: &str) -> CoreResult<Self> {
                Self::decode(raw)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(raw: String) -> CoreResult<Self> {
                Self::decode(&raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.encode()
            }
        }
    )+};
}

codec_traits!(BehaviorTargetId, InteractionTargetId, FulfillmentTargetId, EntityId);
