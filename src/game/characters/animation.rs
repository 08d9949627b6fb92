// Character animation system

use std::collections::HashMap;

/// Named poses a character controller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Move,
    Jump,
    Climb,
    /// Holding still on a climbable surface
    ClimbIdle,
    Hurt,
}

impl Pose {
    pub const ALL: [Pose; 6] = [
        Pose::Idle,
        Pose::Move,
        Pose::Jump,
        Pose::Climb,
        Pose::ClimbIdle,
        Pose::Hurt,
    ];

    /// Name the pose player knows this pose by
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Move => "Move",
            Self::Jump => "Jump",
            Self::Climb => "Climb",
            Self::ClimbIdle => "ClimbIdle",
            Self::Hurt => "Hurt",
        }
    }
}

/// Anything that can be asked to show a named pose.
///
/// Requests are fire-and-forget; asking for the pose already showing must not
/// restart it.
pub trait PosePlayer {
    fn request_pose(&mut self, name: &str);
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "Idle", "Move", "Climb")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Create a single-frame still pose
    pub fn still(name: &str) -> Self {
        Self::new(name, 1, 1.0, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Manages animation playback for a character
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
        }
    }

    /// Create an animation player with one clip per [`Pose`]
    pub fn with_standard_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping(Pose::Idle.name(), 8, 10.0));
        player.add_animation(AnimationClip::looping(Pose::Move.name(), 8, 12.0));
        player.add_animation(AnimationClip::one_shot(Pose::Jump.name(), 6, 12.0));
        player.add_animation(AnimationClip::looping(Pose::Climb.name(), 6, 10.0));
        player.add_animation(AnimationClip::still(Pose::ClimbIdle.name()));
        player.add_animation(AnimationClip::one_shot(Pose::Hurt.name(), 4, 8.0));

        player.play(Pose::Idle.name());

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Check if a clip is registered
    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Play an animation by name; replaying the current one is a no-op
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.current_animation = name.to_string();
            self.current_frame = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
    }

    /// Update the animation (called every tick)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation has finished (for non-looping animations)
    pub fn is_finished(&self) -> bool {
        match self.animations.get(&self.current_animation) {
            Some(clip) => {
                !clip.looping && self.current_frame >= clip.frame_count - 1 && !self.playing
            }
            None => true,
        }
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.animations.get(&self.current_animation)
    }
}

impl PosePlayer for AnimationPlayer {
    fn request_pose(&mut self, name: &str) {
        if self.has_animation(name) {
            self.play(name);
        } else {
            log::trace!("Ignoring request for unknown pose {:?}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_names() {
        assert_eq!(Pose::Jump.name(), "Jump");
        assert_eq!(Pose::ClimbIdle.name(), "ClimbIdle");
        assert_eq!(Pose::Hurt.name(), "Hurt");
    }

    #[test]
    fn test_standard_animations_cover_all_poses() {
        let player = AnimationPlayer::with_standard_animations();
        for pose in Pose::ALL {
            assert!(player.has_animation(pose.name()), "missing {:?}", pose);
        }
        assert_eq!(player.current_animation(), "Idle");
    }

    #[test]
    fn test_animation_clip_creation() {
        let clip = AnimationClip::looping("Idle", 4, 8.0);
        assert_eq!(clip.name, "Idle");
        assert_eq!(clip.frame_count, 4);
        assert_eq!(clip.frame_duration, 0.125); // 1/8
        assert!(clip.looping);
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::looping("Move", 4, 8.0);
        assert_eq!(clip.total_duration(), 0.5);
    }

    #[test]
    fn test_request_pose_switches_clip() {
        let mut player = AnimationPlayer::with_standard_animations();
        player.request_pose("Move");
        assert_eq!(player.current_animation(), "Move");
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_repeated_request_does_not_restart() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("Climb", 4, 10.0));
        player.request_pose("Climb");
        player.update(0.15);
        assert_eq!(player.current_frame(), 1);

        player.request_pose("Climb");
        assert_eq!(player.current_frame(), 1);
    }

    #[test]
    fn test_unknown_pose_is_ignored() {
        let mut player = AnimationPlayer::with_standard_animations();
        player.request_pose("Fall");
        assert_eq!(player.current_animation(), "Idle");
    }

    #[test]
    fn test_animation_looping() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::looping("test", 3, 10.0));
        player.play("test");

        player.update(0.35); // 3.5 frames
        assert_eq!(player.current_frame(), 0);
        assert!(player.is_playing());
    }

    #[test]
    fn test_animation_one_shot() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::one_shot("test", 3, 10.0));
        player.play("test");

        player.update(0.5);
        assert_eq!(player.current_frame(), 2); // Last frame
        assert!(!player.is_playing());
        assert!(player.is_finished());
    }

    #[test]
    fn test_still_pose_holds_single_frame() {
        let mut player = AnimationPlayer::new();
        player.add_animation(AnimationClip::still("ClimbIdle"));
        player.play("ClimbIdle");

        player.update(5.0);
        assert_eq!(player.current_frame(), 0);
        assert!(player.is_finished());
    }
}
