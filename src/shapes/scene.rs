use super::{Point, Polygon, Sprite};
use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A sprite placed in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub sprite: Sprite,
    #[serde(default)]
    pub position: Point,
}

impl Placement {
    /// The sprite moved to its world position
    pub fn placed(&self) -> Sprite {
        self.sprite.translated(self.position)
    }
}

/// A scene is a named list of sprite placements, drawn in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub sprites: Vec<Placement>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sprites: Vec::new(),
        }
    }

    pub fn add(&mut self, sprite: Sprite, position: Point) {
        self.sprites.push(Placement { sprite, position });
    }

    pub fn remove(&mut self, index: usize) -> Option<Placement> {
        if index < self.sprites.len() {
            Some(self.sprites.remove(index))
        } else {
            None
        }
    }

    /// Find a placement by sprite name
    pub fn find(&self, name: &str) -> Option<&Placement> {
        self.sprites.iter().find(|p| p.sprite.name == name)
    }

    /// Every sprite translated to world space
    pub fn placed_sprites(&self) -> Vec<Sprite> {
        self.sprites.iter().map(Placement::placed).collect()
    }

    /// World-space bounding box of everything in the scene
    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.sprites
            .iter()
            .filter_map(|p| {
                p.sprite
                    .bounds()
                    .map(|(tl, br)| (tl + p.position, br + p.position))
            })
            .reduce(|(a_min, a_max), (b_min, b_max)| {
                (
                    Point::new(a_min.x.min(b_min.x), a_min.y.min(b_min.y)),
                    Point::new(a_max.x.max(b_max.x), a_max.y.max(b_max.y)),
                )
            })
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let scene = Self::from_json(&json)?;
        log::info!("Loaded scene '{}' ({} sprites)", scene.name, scene.sprites.len());
        Ok(scene)
    }

    /// Built-in scene used when no scene file is given
    pub fn demo() -> Self {
        let mut scene = Self::new("demo");

        let house = Sprite::new("house")
            .with_part(
                Polygon::from(&[(0, 40), (60, 40), (60, 100), (0, 100)][..]),
                Color::BRONZE,
                Color::WHITE,
            )
            .with_part(
                Polygon::from(&[(-10, 40), (30, 0), (70, 40)][..]),
                Color::RED,
                Color::WHITE,
            )
            .with_part(
                Polygon::from(&[(22, 65), (38, 65), (38, 100), (22, 100)][..]),
                Color::INDIGO,
                Color::YELLOW,
            );
        scene.add(house, Point::new(80, 220));

        let tree = Sprite::new("tree")
            .with_part(
                Polygon::from(&[(16, 60), (24, 60), (24, 90), (16, 90)][..]),
                Color::BRONZE,
                Color::BRONZE,
            )
            .with_part(
                Polygon::from(&[(20, 0), (40, 30), (30, 30), (40, 60), (0, 60), (10, 30), (0, 30)][..]),
                Color::DARK_GREEN,
                Color::GREEN,
            );
        scene.add(tree, Point::new(200, 230));

        // concave star exercises the turning-point handling of the fill
        let star = Sprite::new("star").with_part(
            Polygon::from(
                &[
                    (30, 0),
                    (38, 20),
                    (60, 22),
                    (42, 36),
                    (48, 58),
                    (30, 46),
                    (12, 58),
                    (18, 36),
                    (0, 22),
                    (22, 20),
                ][..],
            ),
            Color::YELLOW,
            Color::ORANGE,
        );
        scene.add(star, Point::new(300, 60));

        let ship = Sprite::new("ship")
            .with_part(
                Polygon::from(&[(0, 0), (50, 20), (0, 40), (12, 20)][..]),
                Color::SILVER,
                Color::SKY_BLUE,
            )
            .with_part(
                Polygon::from(&[(-8, 16), (4, 16), (4, 24), (-8, 24)][..]),
                Color::ORANGE,
                Color::RED,
            );
        scene.add(ship, Point::new(60, 80));

        scene
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i32) -> Sprite {
        Sprite::new("square").with_part(
            Polygon::from(&[(0, 0), (size, 0), (size, size), (0, size)][..]),
            Color::GREEN,
            Color::WHITE,
        )
    }

    #[test]
    fn test_placement_translates_sprite() {
        let mut scene = Scene::new("test");
        scene.add(square(4), Point::new(10, 20));
        let placed = scene.placed_sprites();
        assert_eq!(placed[0].parts[0].polygon.point(2), Some(Point::new(14, 24)));
        // the stored sprite stays in its own frame
        assert_eq!(scene.sprites[0].sprite.parts[0].polygon.point(2), Some(Point::new(4, 4)));
    }

    #[test]
    fn test_bounds_cover_all_placements() {
        let mut scene = Scene::new("test");
        assert_eq!(scene.bounds(), None);
        scene.add(square(4), Point::new(10, 20));
        scene.add(square(2), Point::new(-3, 50));
        assert_eq!(scene.bounds(), Some((Point::new(-3, 20), Point::new(14, 52))));
    }

    #[test]
    fn test_remove_and_find() {
        let mut scene = Scene::demo();
        assert!(scene.find("house").is_some());
        let count = scene.sprites.len();
        assert!(scene.remove(count).is_none());
        let removed = scene.remove(0);
        assert_eq!(removed.map(|p| p.sprite.name), Some("house".to_string()));
        assert!(scene.find("house").is_none());
    }

    #[test]
    fn test_json_uses_named_fields() {
        let mut scene = Scene::new("tiny");
        scene.add(square(3), Point::new(1, 2));
        let json = scene.to_json().unwrap();
        assert!(json.contains("\"position\""));
        assert!(json.contains("\"fill\""));
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_position_defaults_to_origin() {
        let json = r#"{
            "name": "hand written",
            "sprites": [
                { "sprite": { "parts": [
                    { "polygon": { "vertices": [ {"x": 0, "y": 0}, {"x": 5, "y": 0}, {"x": 0, "y": 5} ] },
                      "fill": {"r": 255, "g": 0, "b": 0},
                      "border": {"r": 255, "g": 255, "b": 255} }
                ] } }
            ]
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.sprites[0].position, Point::ORIGIN);
        assert_eq!(scene.sprites[0].sprite.name, "");
        assert_eq!(scene.sprites[0].sprite.parts[0].fill, Color::RED);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Scene::from_json("{\"name\": 3}").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("scanfill-scene-{}.json", std::process::id()));
        let scene = Scene::demo();
        scene.save(&path).unwrap();
        let loaded = Scene::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, scene);
        assert!(Scene::load(&path).is_err());
    }
}
