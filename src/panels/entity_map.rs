//! Entity map panel: host entities plotted around a centered crosshair

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Color;
use crate::component::{Lineage, Renderable};
use crate::surface::Surface;

const KIND: &str = "entity-map";

const BACKGROUND: Color = Color::rgb(0xf7, 0xf7, 0xf7);
const GRID: Color = Color::rgb(0xc4, 0xc4, 0xc4);
const ENTITY: Color = Color::rgb(0x36, 0x36, 0x3e);
const NEWEST: Color = Color::rgb(0x36, 0x36, 0xcf);

/// World units per map pixel
const SCALE: f32 = 5.0;
/// Side of the reference square, in map pixels
const REFERENCE_SQUARE: i32 = 500;
const LINE: i32 = 2;
const MARKER_RADIUS: i32 = 3;
const LABEL_SIZE: f32 = 10.0;

/// A positioned entity reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Larger ids are newer
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl Entity {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    /// Map position inside a `width` x `height` panel
    pub fn plot(&self, width: i32, height: i32) -> (i32, i32) {
        (
            (self.x / SCALE + width as f32 / 2.0).round() as i32,
            (self.y / SCALE + height as f32 / 2.0).round() as i32,
        )
    }

    fn label(&self) -> String {
        format!("({}, {})", self.x.round() as i64, self.y.round() as i64)
    }
}

/// Where the map reads entities from each frame
pub trait EntitySource {
    fn entities(&self) -> Vec<Entity>;
}

/// A shared, host-updated list of entities
#[derive(Debug, Clone, Default)]
pub struct StaticEntities {
    entities: Rc<RefCell<Vec<Entity>>>,
}

impl StaticEntities {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities: Rc::new(RefCell::new(entities)),
        }
    }

    pub fn push(&self, entity: Entity) {
        self.entities.borrow_mut().push(entity);
    }

    /// Id one above the newest entity
    pub fn next_id(&self) -> u64 {
        self.entities
            .borrow()
            .iter()
            .map(|entity| entity.id + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        self.entities.borrow_mut().clear();
    }
}

impl EntitySource for StaticEntities {
    fn entities(&self) -> Vec<Entity> {
        self.entities.borrow().clone()
    }
}

/// Id of the newest entity, if any
pub fn newest_id(entities: &[Entity]) -> Option<u64> {
    entities.iter().map(|entity| entity.id).max()
}

pub struct EntityMap {
    lineage: Lineage,
    source: Box<dyn EntitySource>,
}

impl EntityMap {
    pub fn new(lineage: Lineage, source: impl EntitySource + 'static) -> Self {
        Self {
            lineage,
            source: Box::new(source),
        }
    }

    fn draw_grid(surface: &mut dyn Surface, width: i32, height: i32) {
        let (cx, cy) = (width / 2, height / 2);
        let half = REFERENCE_SQUARE / 2;

        surface.fill(GRID);
        surface.rect(cx, 0, LINE, height);
        surface.rect(0, cy, width, LINE);

        surface.rect(cx - half, cy - half, LINE, REFERENCE_SQUARE);
        surface.rect(cx - half, cy - half, REFERENCE_SQUARE, LINE);
        surface.rect(cx + half, cy - half, LINE, REFERENCE_SQUARE);
        surface.rect(cx - half, cy + half, REFERENCE_SQUARE, LINE);
    }
}

impl Renderable for EntityMap {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        surface.fill(BACKGROUND);
        surface.rect(0, 0, width, height);
        Self::draw_grid(surface, width, height);

        let entities = self.source.entities();
        let newest = newest_id(&entities);
        surface.font(LABEL_SIZE);
        for entity in &entities {
            let color = if Some(entity.id) == newest {
                NEWEST
            } else {
                ENTITY
            };
            let (x, y) = entity.plot(width, height);
            surface.fill(color);
            surface.circle(x, y, MARKER_RADIUS);
            surface.text(&entity.label(), x + 5, y);
        }
    }
}
