//! Entity store: named rectangles grouped by category
//!
//! Every game object is a 2D rectangle with a name that is unique within its
//! category. Categories are a fixed enum indexing a table of collections, and
//! iteration within a category is in name order so each frame is processed
//! the same way every run.

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::error::SimError;
use crate::renderer::vertex::colors;
use crate::renderer::{Presenter, PrimitiveKind, RenderHandle, shapes};

/// Which collection an entity lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bricks,
    GunParts,
    Beams,
    Mirrors,
    Buckets,
    ScoreDigitSegments,
    LifeIcons,
    Highlights,
}

impl Category {
    pub const COUNT: usize = 8;

    pub const ALL: [Category; Self::COUNT] = [
        Category::Bricks,
        Category::GunParts,
        Category::Beams,
        Category::Mirrors,
        Category::Buckets,
        Category::ScoreDigitSegments,
        Category::LifeIcons,
        Category::Highlights,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bricks => "bricks",
            Category::GunParts => "gun parts",
            Category::Beams => "beams",
            Category::Mirrors => "mirrors",
            Category::Buckets => "buckets",
            Category::ScoreDigitSegments => "score digit segments",
            Category::LifeIcons => "life icons",
            Category::Highlights => "highlights",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat colors used by game objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Black,
    Grey,
    Purple,
    Yellow,
}

impl Color {
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Color::Red => colors::RED,
            Color::Blue => colors::BLUE,
            Color::Black => colors::BLACK,
            Color::Grey => colors::GREY,
            Color::Purple => colors::PURPLE,
            Color::Yellow => colors::YELLOW,
        }
    }
}

/// Whether an entity still takes part in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activity {
    /// Normal: simulated, collided and drawn
    #[default]
    Spawned,
    /// Outcome settled; still moves and draws but no longer collides
    Resolved,
    /// Gone: skipped everywhere and dropped by the next sweep
    Removed,
}

/// A named 2D rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub width: f32,
    /// Rotation in degrees, counter-clockwise
    pub angle: f32,
    pub color: Color,
    pub handle: RenderHandle,
    pub activity: Activity,
    /// Bounces beams that hit it (mirror faces only)
    #[serde(default)]
    pub reflective: bool,
}

impl GameObject {
    pub fn new(
        name: impl Into<String>,
        color: Color,
        x: f32,
        y: f32,
        height: f32,
        width: f32,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            height,
            width,
            angle: 0.0,
            color,
            handle: RenderHandle::default(),
            activity: Activity::Spawned,
            reflective: false,
        }
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn reflecting(mut self) -> Self {
        self.reflective = true;
        self
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Unrotated bounding box
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos(), self.width, self.height)
    }

    pub fn is_active(&self) -> bool {
        self.activity == Activity::Spawned
    }

    pub fn is_removed(&self) -> bool {
        self.activity == Activity::Removed
    }
}

type Table = BTreeMap<String, GameObject>;

/// All game objects, one table per category
#[derive(Debug, Clone)]
pub struct EntityStore {
    tables: [Table; Category::COUNT],
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            tables: std::array::from_fn(|_| Table::new()),
        }
    }

    /// Add an object, registering a rectangle mesh for it with the presenter.
    ///
    /// The object's handle is filled in from the presenter; a presenter
    /// failure is returned as-is since an object without geometry cannot be
    /// drawn.
    pub fn create(
        &mut self,
        gfx: &mut impl Presenter,
        category: Category,
        mut object: GameObject,
    ) -> Result<RenderHandle, SimError> {
        if self.contains(category, &object.name) {
            return Err(SimError::DuplicateName {
                category,
                name: object.name,
            });
        }

        let mesh = shapes::rectangle(object.width, object.height, object.color.rgb());
        let handle = gfx.register_renderable(&mesh, PrimitiveKind::Triangles)?;
        object.handle = handle;
        object.activity = Activity::Spawned;

        self.tables[category.index()].insert(object.name.clone(), object);
        Ok(handle)
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.tables[category.index()].contains_key(name)
    }

    pub fn get(&self, category: Category, name: &str) -> Result<&GameObject, SimError> {
        self.tables[category.index()]
            .get(name)
            .ok_or_else(|| SimError::NotFound {
                category,
                name: name.to_string(),
            })
    }

    pub fn get_mut(&mut self, category: Category, name: &str) -> Result<&mut GameObject, SimError> {
        self.tables[category.index()]
            .get_mut(name)
            .ok_or_else(|| SimError::NotFound {
                category,
                name: name.to_string(),
            })
    }

    /// Every object in the category, removed ones included, in name order
    pub fn iter(&self, category: Category) -> impl Iterator<Item = &GameObject> {
        self.tables[category.index()].values()
    }

    pub fn iter_mut(&mut self, category: Category) -> impl Iterator<Item = &mut GameObject> {
        self.tables[category.index()].values_mut()
    }

    /// Objects that have not been removed
    pub fn live(&self, category: Category) -> impl Iterator<Item = &GameObject> {
        self.iter(category).filter(|o| !o.is_removed())
    }

    pub fn for_each(&self, category: Category, mut f: impl FnMut(&GameObject)) {
        for object in self.iter(category) {
            f(object);
        }
    }

    pub fn len(&self, category: Category) -> usize {
        self.tables[category.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(Table::is_empty)
    }

    /// Drop every removed object and release its mesh; returns how many were dropped
    pub fn sweep(&mut self, gfx: &mut impl Presenter) -> usize {
        let mut dropped = 0;
        for table in &mut self.tables {
            table.retain(|_, o| {
                if o.is_removed() {
                    gfx.release(o.handle);
                    dropped += 1;
                    false
                } else {
                    true
                }
            });
        }
        dropped
    }
}
