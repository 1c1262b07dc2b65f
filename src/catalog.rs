//! Static list of node archetypes offered by the "add node" sidebar.

use slint::Color;

/// Icon glyph shown next to an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    MessagesSquare,
    ArrowLeftRight,
    Pencil,
    Funnel,
    Bot,
    Mail,
    Database,
    BotMessageSquare,
    MailPlus,
    NotebookPen,
    CodeXml,
}

impl Icon {
    /// Kebab-case glyph name, used to pick the image in the UI.
    pub fn name(self) -> &'static str {
        match self {
            Icon::MessagesSquare => "messages-square",
            Icon::ArrowLeftRight => "arrow-left-right",
            Icon::Pencil => "pencil",
            Icon::Funnel => "funnel",
            Icon::Bot => "bot",
            Icon::Mail => "mail",
            Icon::Database => "database",
            Icon::BotMessageSquare => "bot-message-square",
            Icon::MailPlus => "mail-plus",
            Icon::NotebookPen => "notebook-pen",
            Icon::CodeXml => "code-xml",
        }
    }
}

/// A kind of workflow step that can be added to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub icon: Icon,
    pub title: &'static str,
    pub description: &'static str,
    /// Type tag copied onto created nodes.
    pub kind: &'static str,
}

impl Archetype {
    const fn new(icon: Icon, title: &'static str, description: &'static str, kind: &'static str) -> Self {
        Self { icon, title, description, kind }
    }

    /// Color of the archetype's icon; stable for a given type tag.
    pub fn icon_color(&self) -> Color {
        icon_color(self.kind)
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

const AI_TRIGGER: &str = "Runs the flow when a user send a chat message. For use with AI nodes.";

/// Sidebar entries in display order.
pub const WORKFLOW_STEPS: &[Archetype] = &[
    Archetype::new(
        Icon::MessagesSquare,
        "On Chat Message",
        "Runs flow when a user send a chat message. For use with AI nodes",
        "chat-message",
    ),
    Archetype::new(
        Icon::ArrowLeftRight,
        "Switch",
        "Routes items depending on defined expression or rules",
        "switch",
    ),
    Archetype::new(Icon::Pencil, "Edit", "Modify, Add or Remove item fields", "edit"),
    Archetype::new(Icon::Funnel, "Filter", "Remove items matching a conditions", "filter"),
    Archetype::new(
        Icon::Bot,
        "AI Agent",
        "Runs the flow when a user send a chat message. For use with AI nodes",
        "ai-agent",
    ),
    Archetype::new(Icon::Bot, "Customer Support Agent", AI_TRIGGER, "support-agent"),
    Archetype::new(Icon::Mail, "Send Email", "Send email to a user.", "email"),
    Archetype::new(
        Icon::Database,
        "Vector Store",
        "Store and retrieve data from a vector database.",
        "database",
    ),
    Archetype::new(Icon::Database, "PgVector", "Answer questions with a vector store.", "postgresql"),
    Archetype::new(Icon::BotMessageSquare, "Ollama Chat Model", AI_TRIGGER, "ollama"),
    Archetype::new(Icon::MailPlus, "Gmail Trigger", AI_TRIGGER, "gmail"),
    Archetype::new(
        Icon::NotebookPen,
        "Create Draft",
        "Creates a draft with specified content and recipients.",
        "draft",
    ),
    Archetype::new(
        Icon::CodeXml,
        "Embed everything",
        "Generates text embeddings from input data for use in search or analysis.",
        "embed",
    ),
];

/// Icon palette: orange, blue, green, sky, pink, cyan.
const ICON_PALETTE: [(u8, u8, u8); 6] = [
    (0xf9, 0x73, 0x16),
    (0x3b, 0x82, 0xf6),
    (0x22, 0xc5, 0x5e),
    (0x0e, 0xa5, 0xe9),
    (0xec, 0x48, 0x99),
    (0x06, 0xb6, 0xd4),
];

/// Pick a palette color from a stable hash (FNV-1a) of `key`.
pub fn icon_color(key: &str) -> Color {
    let hash = key
        .bytes()
        .fold(0x811c_9dc5_u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    let (r, g, b) = ICON_PALETTE[hash as usize % ICON_PALETTE.len()];
    Color::from_rgb_u8(r, g, b)
}

/// Read-only view over the archetype list.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    steps: &'static [Archetype],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self { steps: WORKFLOW_STEPS }
    }

    pub fn with_steps(steps: &'static [Archetype]) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'static, Archetype> {
        self.steps.iter()
    }

    /// Look up an archetype by type tag.
    pub fn find(&self, kind: &str) -> Option<&'static Archetype> {
        self.steps.iter().find(|step| step.kind == kind)
    }

    /// Case-insensitive substring match on title and description. A blank
    /// query returns every entry.
    pub fn search(&self, query: &str) -> Vec<&'static Archetype> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.steps.iter().collect();
        }
        self.steps.iter().filter(|step| step.matches(&needle)).collect()
    }
}
