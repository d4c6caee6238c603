use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::goals_errors::{GoalError, Result};

/// Domain model for a sales goal. A goal without a product applies to the
/// owner's whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i32,
    pub user_id: i32,
    pub goal_name: String,
    pub product_id: Option<i32>,
    pub target_revenue: Option<f64>,
    pub target_quantity: Option<i32>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub goal_name: String,
    pub product_id: Option<i32>,
    pub target_revenue: Option<f64>,
    pub target_quantity: Option<i32>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.goal_name.trim().is_empty() {
            return Err(GoalError::InvalidData(
                "Goal name and deadline are required.".to_string(),
            ));
        }
        if self.target_revenue.is_none() && self.target_quantity.is_none() {
            return Err(GoalError::InvalidData(
                "You must set a target for either revenue or quantity.".to_string(),
            ));
        }
        if let Some(revenue) = self.target_revenue {
            if !revenue.is_finite() || revenue <= 0.0 {
                return Err(GoalError::InvalidData(
                    "Target revenue must be a positive number.".to_string(),
                ));
            }
        }
        if let Some(quantity) = self.target_quantity {
            if quantity <= 0 {
                return Err(GoalError::InvalidData(
                    "Target quantity must be a positive integer.".to_string(),
                ));
            }
        }
        if self.deadline < self.start_date {
            return Err(GoalError::InvalidData(
                "Deadline cannot be before the start date.".to_string(),
            ));
        }
        Ok(())
    }
}

/// A goal joined with its sales progress over the goal window. The raw
/// percentages may exceed 100; clamping is left to display code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub current_revenue: f64,
    pub current_quantity: i64,
}

impl GoalWithProgress {
    /// Raw percent of the revenue target, unclamped; `None` without a target
    pub fn revenue_percent(&self) -> Option<f64> {
        self.goal
            .target_revenue
            .filter(|t| *t > 0.0)
            .map(|t| self.current_revenue / t * 100.0)
    }

    /// Raw percent of the quantity target, unclamped; `None` without a target
    pub fn quantity_percent(&self) -> Option<f64> {
        self.goal
            .target_quantity
            .filter(|t| *t > 0)
            .map(|t| self.current_quantity as f64 / t as f64 * 100.0)
    }

    /// Percent clamped to 0..=100 for progress-bar styling
    pub fn display_percent(&self) -> Option<f64> {
        self.revenue_percent()
            .or_else(|| self.quantity_percent())
            .map(|p| p.clamp(0.0, 100.0))
    }
}

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    #[diesel(skip_insertion)]
    pub id: i32,
    pub user_id: i32,
    pub goal_name: String,
    pub product_id: Option<i32>,
    pub target_revenue: Option<f64>,
    pub target_quantity: Option<i32>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            goal_name: db.goal_name,
            product_id: db.product_id,
            target_revenue: db.target_revenue,
            target_quantity: db.target_quantity,
            start_date: db.start_date,
            deadline: db.deadline,
            created_at: db.created_at,
        }
    }
}

impl GoalDB {
    pub fn from_new(user_id: i32, new_goal: NewGoal) -> Self {
        Self {
            id: 0,
            user_id,
            goal_name: new_goal.goal_name.trim().to_string(),
            product_id: new_goal.product_id,
            target_revenue: new_goal.target_revenue,
            target_quantity: new_goal.target_quantity,
            start_date: new_goal.start_date,
            deadline: new_goal.deadline,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target_revenue: Option<f64>, target_quantity: Option<i32>) -> NewGoal {
        NewGoal {
            goal_name: "Q3 push".to_string(),
            product_id: None,
            target_revenue,
            target_quantity,
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            deadline: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        }
    }

    #[test]
    fn at_least_one_target_is_required() {
        assert!(goal(None, None).validate().is_err());
        assert!(goal(Some(1000.0), None).validate().is_ok());
        assert!(goal(None, Some(50)).validate().is_ok());
    }

    #[test]
    fn deadline_before_start_is_rejected() {
        let mut g = goal(Some(1000.0), None);
        g.deadline = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(g.validate().is_err());
    }

    #[test]
    fn raw_percent_is_not_clamped() {
        let g = GoalWithProgress {
            goal: Goal {
                id: 1,
                user_id: 1,
                goal_name: "x".to_string(),
                product_id: None,
                target_revenue: Some(100.0),
                target_quantity: None,
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                deadline: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                created_at: chrono::Utc::now().naive_utc(),
            },
            current_revenue: 250.0,
            current_quantity: 0,
        };
        assert_eq!(g.revenue_percent(), Some(250.0));
        assert_eq!(g.display_percent(), Some(100.0));
    }
}
