//! Round controller for the matching game.
//!
//! A round shows four items picked from one random [`ItemSet`]: the correct
//! one (always index 0 of the current set) and three decoys. The items are
//! placed on four fixed screen slots through a random permutation, and a
//! replica of the correct item is shown at the top centre so the player knows
//! what to look for.
//!
//! Every tick [`RoundState::tick`] advances the round objects and tests a
//! square probe around each tracked hand against the correct object. The
//! first hand that touches it solves the round, which is regenerated right
//! away, so a round is regenerated at most once per tick no matter how many
//! hands hit it. Touching a decoy does nothing.
//!
//! # States
//!
//! ```text
//! Idle --generate_round--> Active --hand hits correct item--> Active (new round)
//! ```
//!
//! The random source is owned by the resource and can be seeded, which keeps
//! round generation reproducible in tests and from the command line.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::boundingbox::BoundingBox;
use crate::components::gameobject::GameObject;
use crate::resources::itemcatalog::{ItemCatalog, ItemImage};

/// Items shown per round: one correct, the rest decoys.
pub const SET_SIZE: usize = 4;
/// Side of the square probe centred on a hand, in pixels.
pub const DEFAULT_PROBE_SIZE: f32 = 80.0;
/// Gap between the top edge and the top-left slot.
pub const DEFAULT_SLOT_SPACING: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    Active,
}

/// What happened to the round on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundOutcome {
    /// No round has been generated yet.
    Idle,
    /// No hand touched the correct item.
    Miss,
    /// A hand at `position` touched the correct item; a new round is already up.
    Solved { position: Vector2 },
}

/// The four fixed slots: top-left, bottom-left, top-right, bottom-right.
///
/// Slot geometry follows the size of the correct item so that it fits on the
/// right edge of a screen `screen_width` pixels wide.
pub fn slot_positions(
    screen_width: f32,
    item_width: f32,
    item_height: f32,
    spacing: f32,
) -> ArrayVec<Vector2, SET_SIZE> {
    let right = screen_width - item_width;
    let bottom = item_height * 4.0;
    ArrayVec::from([
        Vector2::new(0.0, spacing),
        Vector2::new(0.0, bottom),
        Vector2::new(right, 0.0),
        Vector2::new(right, bottom),
    ])
}

#[derive(Resource, Debug)]
pub struct RoundState {
    phase: RoundPhase,
    current_set: Vec<GameObject>,
    item_names: ArrayVec<String, SET_SIZE>,
    set_name: Option<String>,
    position_pool: ArrayVec<Vector2, SET_SIZE>,
    /// `slot_order[i]` is the pool slot used by `current_set[i]`.
    slot_order: ArrayVec<usize, SET_SIZE>,
    replica: Option<GameObject>,
    rounds_completed: u32,
    pub screen_width: f32,
    pub probe_size: f32,
    pub slot_spacing: f32,
    rng: Rng,
}

impl RoundState {
    pub fn new(screen_width: f32) -> Self {
        Self::with_rng(screen_width, Rng::new())
    }

    /// Reproducible rounds for a given seed.
    pub fn with_seed(screen_width: f32, seed: u64) -> Self {
        Self::with_rng(screen_width, Rng::with_seed(seed))
    }

    fn with_rng(screen_width: f32, rng: Rng) -> Self {
        Self {
            phase: RoundPhase::Idle,
            current_set: Vec::with_capacity(SET_SIZE),
            item_names: ArrayVec::new(),
            set_name: None,
            position_pool: ArrayVec::new(),
            slot_order: ArrayVec::new(),
            replica: None,
            rounds_completed: 0,
            screen_width,
            probe_size: DEFAULT_PROBE_SIZE,
            slot_spacing: DEFAULT_SLOT_SPACING,
            rng,
        }
    }

    pub fn with_probe_size(mut self, size: f32) -> Self {
        self.probe_size = size;
        self
    }

    pub fn with_slot_spacing(mut self, spacing: f32) -> Self {
        self.slot_spacing = spacing;
        self
    }

    /// Replace the current round with a fresh one drawn from `catalog`.
    ///
    /// Fails when no set holds at least [`SET_SIZE`] items; the current round
    /// is left untouched in that case.
    pub fn generate_round(&mut self, catalog: &ItemCatalog) -> Result<(), String> {
        let eligible = catalog.eligible_sets(SET_SIZE);
        if eligible.is_empty() {
            return Err(format!(
                "No item set has at least {} items ({} sets loaded)",
                SET_SIZE,
                catalog.sets().len()
            ));
        }
        let set = eligible[self.rng.usize(..eligible.len())];

        // Draw without replacement: the first SET_SIZE of a shuffled index list.
        let mut indices: Vec<usize> = (0..set.items.len()).collect();
        self.rng.shuffle(&mut indices);
        let chosen: ArrayVec<&ItemImage, SET_SIZE> = indices
            .iter()
            .take(SET_SIZE)
            .map(|&i| &set.items[i])
            .collect();

        let solution = chosen[0];
        self.position_pool = slot_positions(
            self.screen_width,
            solution.width,
            solution.height,
            self.slot_spacing,
        );

        let mut slots: ArrayVec<usize, SET_SIZE> = (0..SET_SIZE).collect();
        self.rng.shuffle(&mut slots);

        self.current_set.clear();
        self.item_names.clear();
        for (item, &slot) in chosen.iter().zip(slots.iter()) {
            let sprite = AnimatedSprite::still(item.tex_key.as_str(), item.width, item.height);
            self.current_set
                .push(GameObject::new(&sprite, self.position_pool[slot]));
            self.item_names.push(item.name.clone());
        }
        self.current_set[0].is_solution_object = true;

        let replica_sprite =
            AnimatedSprite::still(solution.tex_key.as_str(), solution.width, solution.height);
        self.replica = Some(GameObject::new(
            &replica_sprite,
            Vector2::new(self.screen_width / 2.0, 0.0),
        ));

        self.slot_order = slots;
        self.set_name = Some(set.name.clone());
        self.phase = RoundPhase::Active;

        info!(
            "New round from '{}': find '{}' (decoys: {})",
            set.name,
            self.item_names[0],
            self.item_names[1..].join(", ")
        );
        debug!("Slot order: {:?}", self.slot_order);
        Ok(())
    }

    /// First hand whose probe touches the correct object.
    pub fn check_hands(&self, hands: &[Vector2]) -> Option<Vector2> {
        let solution = self.current_set.first()?;
        hands.iter().copied().find(|&hand| {
            solution.collides_with_box(&BoundingBox::centered(hand, self.probe_size))
        })
    }

    /// Advance the round objects and resolve hand contacts for one tick.
    pub fn tick(
        &mut self,
        hands: &[Vector2],
        catalog: &ItemCatalog,
    ) -> Result<RoundOutcome, String> {
        if self.phase == RoundPhase::Idle {
            return Ok(RoundOutcome::Idle);
        }

        for object in self.current_set.iter_mut() {
            object.update();
        }
        if let Some(replica) = self.replica.as_mut() {
            replica.update();
        }

        match self.check_hands(hands) {
            Some(position) => {
                self.rounds_completed += 1;
                info!(
                    "Correct! '{}' touched at ({:.0}, {:.0}), {} rounds completed",
                    self.item_names[0], position.x, position.y, self.rounds_completed
                );
                self.generate_round(catalog)?;
                Ok(RoundOutcome::Solved { position })
            }
            None => Ok(RoundOutcome::Miss),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Current round objects; index 0 is the correct one.
    pub fn current_set(&self) -> &[GameObject] {
        &self.current_set
    }

    pub fn solution(&self) -> Option<&GameObject> {
        self.current_set.first()
    }

    pub fn solution_name(&self) -> Option<&str> {
        self.item_names.first().map(String::as_str)
    }

    pub fn item_names(&self) -> &[String] {
        &self.item_names
    }

    pub fn set_name(&self) -> Option<&str> {
        self.set_name.as_deref()
    }

    pub fn position_pool(&self) -> &[Vector2] {
        &self.position_pool
    }

    pub fn slot_order(&self) -> &[usize] {
        &self.slot_order
    }

    pub fn replica(&self) -> Option<&GameObject> {
        self.replica.as_ref()
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }
}
