// Host page mount points, selectors and drawing colours

pub const HOLO_CANVAS_ID: &str = "holo-canvas";
pub const CURSOR_CANVAS_ID: &str = "cursor-canvas";
pub const LANYARD_ROOT_ID: &str = "lanyard-root";

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const REVEAL_ID_ATTR: &str = "data-reveal-id";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub const CONTACT_OPEN_SELECTOR: &str = "[data-contact-open]";
pub const COPY_EMAIL_SELECTOR: &str = "[data-copy-email]";
pub const EMAIL_ATTR: &str = "data-email";
pub const DEFAULT_EMAIL: &str = "hello@example.com";

// Contact overlay element ids; the overlay exists only while open
pub const MODAL_ROOT_ID: &str = "contact-modal";
pub const MODAL_PANEL_ID: &str = "contact-modal-panel";
pub const MODAL_CLOSE_ID: &str = "contact-modal-close";
pub const MODAL_COPY_ID: &str = "contact-modal-copy";
pub const MODAL_ROOT_STYLE: &str = "position:fixed; inset:0; z-index:9999; display:flex; \
align-items:center; justify-content:center; padding:1rem;";
pub const MODAL_BACKDROP_STYLE: &str = "position:absolute; inset:0; background:rgba(0,0,0,0.5); \
backdrop-filter:blur(4px);";
pub const MODAL_PANEL_STYLE: &str = "position:relative; max-width:24rem; width:100%; padding:1.5rem; \
border-radius:0.75rem; background:rgba(88,28,135,0.9); border:1px solid rgba(168,85,247,0.2); \
color:#f3e8ff;";

pub const CURSOR_HIDE_CSS: &str = "* { cursor: none !important; }";

pub const LANYARD_BAND_TEXTURE: &str = "/lanyard/lanyard.png";
pub const LANYARD_CARD_IMAGE: &str = "/lanyard/card.png";
pub const LANYARD_PLACEHOLDER_COLOR: &str = "#8B5CF6";
pub const LANYARD_BAND_WIDTH_PX: f64 = 6.0;
pub const LANYARD_PREVIEW_NOTE: &str = "3D badge is disabled in this preview.";

// Cursor overlay palette (purple / fuchsia)
pub const CURSOR_RING_COLOR: &str = "rgba(192, 132, 252, 0.6)";
pub const CURSOR_PULSE_COLOR: &str = "rgba(232, 121, 249, 1)";
pub const CURSOR_CORE_COLOR: &str = "rgba(255, 255, 255, 1)";
pub const CURSOR_ORBIT_COLOR: &str = "rgba(216, 180, 254, 1)";
pub const CURSOR_HALO_INNER: &str = "rgba(168, 85, 247, 0.35)";
pub const CURSOR_HALO_OUTER: &str = "rgba(217, 70, 239, 0)";
pub const CURSOR_TRAIL_INNER: &str = "rgba(217, 70, 239, 0.25)";
pub const CURSOR_TRAIL_OUTER: &str = "rgba(168, 85, 247, 0)";
pub const CURSOR_INNER_GLOW_INNER: &str = "rgba(168, 85, 247, 0.3)";
pub const CURSOR_INNER_GLOW_OUTER: &str = "rgba(217, 70, 239, 0)";
