use super::goals_errors::Result;
use super::goals_model::GoalDB;

/// Trait for goal repository operations
pub trait GoalRepositoryTrait: Send + Sync {
    fn insert(&self, new_goal: &GoalDB) -> Result<GoalDB>;
    fn list(&self, user_id: i32) -> Result<Vec<GoalDB>>;
    fn find(&self, user_id: i32, goal_id: i32) -> Result<Option<GoalDB>>;
    fn delete(&self, user_id: i32, goal_id: i32) -> Result<()>;
}
