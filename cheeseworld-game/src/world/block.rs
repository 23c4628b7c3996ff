use glam::{vec3, IVec3, Vec3};

/// An sRGB colour, stored the way the catalog writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// Converts to linear RGB in `[0, 1]`, ready for an sRGB render target.
    pub fn to_linear(self) -> Vec3 {
        vec3(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockType {
    pub name: &'static str,
    pub color: Color,
    pub icon: &'static str,
}

pub const CHEDDAR: BlockType = BlockType {
    name: "Cheddar",
    color: Color::from_hex(0xF59E0B),
    icon: "sparkles",
};

pub const CATALOG: &[BlockType] = &[
    CHEDDAR,
    BlockType {
        name: "Parmesan",
        color: Color::from_hex(0xFDE047),
        icon: "star",
    },
    BlockType {
        name: "Mozzarella",
        color: Color::from_hex(0xFEFCE8),
        icon: "cloud",
    },
    BlockType {
        name: "Blue Cheese",
        color: Color::from_hex(0x93C5FD),
        icon: "snowflake",
    },
    BlockType {
        name: "Gouda",
        color: Color::from_hex(0xFB923C),
        icon: "circle",
    },
    BlockType {
        name: "Swiss",
        color: Color::from_hex(0xFEF3C7),
        icon: "disc",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub position: IVec3,
    pub color: Color,
    pub type_name: &'static str,
}

impl Block {
    pub fn new(position: IVec3, block_type: &BlockType) -> Self {
        Self {
            position,
            color: block_type.color,
            type_name: block_type.name,
        }
    }
}
