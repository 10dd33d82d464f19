// Shared effect tuning constants used by the web frontend.

// Cursor trail
pub const TRAIL_CAPACITY: usize = 50; // live particles kept, oldest evicted first
pub const SPAWN_PROBABILITY: f64 = 0.3; // chance of a particle per pointer move
pub const PARTICLE_LIFE_FRAMES: u32 = 60;
pub const PARTICLE_SPEED_MAX: f32 = 2.0; // velocity is uniform in [-max, max] per axis
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_MAX: f32 = 4.0;
pub const PARTICLE_HUE_MIN: f32 = 270.0; // purple
pub const PARTICLE_HUE_MAX: f32 = 330.0; // pink
pub const PARTICLE_DAMPING: f32 = 0.98; // velocity multiplier per frame

// Cursor glyph and glow followers (stiffness, damping, mass, half-size offset)
pub const GLYPH_SPRING: (f32, f32, f32) = (150.0, 15.0, 0.1);
pub const GLYPH_OFFSET: f32 = 20.0;
pub const GLYPH_HOVER_SCALE: f32 = 1.5;
pub const HALO_SPRING: (f32, f32, f32) = (50.0, 30.0, 0.8);
pub const HALO_OFFSET: f32 = 100.0;
pub const HALO_OPACITY_IDLE: f32 = 0.2;
pub const HALO_OPACITY_HOVER: f32 = 0.4;
pub const TRAIL_LIGHT_SPRING: (f32, f32, f32) = (80.0, 40.0, 1.2);
pub const TRAIL_LIGHT_OFFSET: f32 = 75.0;
pub const TRAIL_LIGHT_OPACITY: f32 = 0.6;
pub const SPRING_MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0;
pub const CURSOR_MAX_FRAME_DT_SEC: f32 = 0.1; // longer frames (tab resumed) are clamped

// Hover ripple and inner glow
pub const RIPPLE_RADIUS: f32 = 25.0;
pub const RIPPLE_MAX_SCALE: f32 = 2.0;
pub const RIPPLE_START_OPACITY: f32 = 0.8;
pub const RIPPLE_DURATION_SEC: f32 = 0.6;
pub const INNER_GLOW_DIAMETER_IDLE: f32 = 40.0;
pub const INNER_GLOW_DIAMETER_HOVER: f32 = 60.0;
pub const INNER_GLOW_EASE_SEC: f32 = 0.3;

// Glyph decoration periods (seconds)
pub const RING_ROTATION_PERIOD_SEC: f32 = 8.0;
pub const RING_PULSE_PERIOD_SEC: f32 = 2.0;
pub const ORBIT_PERIOD_SEC: f32 = 4.0;
pub const ORBIT_RADIUS: f32 = 15.0;
pub const ORBIT_ANGLES_DEG: [f32; 3] = [0.0, 120.0, 240.0];

// Holographic background
pub const HOLO_TIME_STEP: f64 = 16.0; // time units per frame
pub const HOLO_GRID_SPACING: f64 = 80.0;
pub const HOLO_GRID_OPACITY: f64 = 0.15;
pub const HOLO_GLOW_COUNT: usize = 50;
pub const HOLO_GRADIENT_RADIUS_FACTOR: f64 = 0.8; // outer radius relative to width

// Scroll reveal defaults
pub const REVEAL_DEFAULT_DURATION_MS: u32 = 700;
pub const REVEAL_DEFAULT_THRESHOLD: f64 = 0.15;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -10% 0px"; // fire slightly before fully in view

// Contact modal
pub const COPIED_FEEDBACK_MS: u64 = 2000;

// Lanyard
pub const LANYARD_TIMESTEP_SEC: f32 = 1.0 / 60.0;
pub const LANYARD_MAX_STEPS_PER_FRAME: u32 = 8;
pub const LANYARD_CARD_ANCHOR: [f32; 3] = [0.0, 1.5, 0.0];
pub const LANYARD_CARD_HALF_EXTENTS: [f32; 2] = [0.8, 1.125];
pub const LANYARD_CARD_HALF_DEPTH: f32 = 0.01;
pub const LANYARD_JOINT_RADII: [f32; 3] = [0.12, 0.11, 0.10]; // J1..J3 ball colliders
pub const LANYARD_LINEAR_DAMPING: f32 = 4.0;
pub const LANYARD_ANGULAR_DAMPING: f32 = 4.0;
pub const LANYARD_UPRIGHT_GAIN: f32 = 0.25; // spin about y removed per frame, per unit of twist
// fixed anchor, three rope joints, card; rope rest lengths come from this spacing
pub const LANYARD_INITIAL_POSITIONS: [[f32; 3]; 5] = [
    [0.0, 18.0, 0.0],
    [0.5, 12.0, 0.0],
    [1.0, 6.0, 0.0],
    [1.5, 2.0, 0.0],
    [2.0, -4.0, 0.0],
];
pub const LANYARD_CURVE_SEGMENTS: usize = 32;
pub const LANYARD_MIN_SPEED: f32 = 0.0;
pub const LANYARD_MAX_SPEED: f32 = 50.0;
