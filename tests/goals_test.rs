mod common;

use stockbook_core::goals::{GoalError, GoalService, NewGoal};
use stockbook_core::reports::ReportService;
use stockbook_core::sales::SaleService;

fn revenue_goal(name: &str, target: f64, product_id: Option<i32>) -> NewGoal {
    NewGoal {
        goal_name: name.to_string(),
        product_id,
        target_revenue: Some(target),
        target_quantity: None,
        start_date: common::day(2025, 6, 1),
        deadline: common::day(2025, 6, 30),
    }
}

#[test]
fn progress_sums_sales_inside_the_goal_window() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let goals = GoalService::new(db.pool.clone());
    let sales = SaleService::new(db.pool.clone());

    let widget = common::create_product(&db.pool, user_id, "Widget", None, 10.0, 200);

    goals
        .create_goal(user_id, revenue_goal("June push", 1000.0, None))
        .unwrap();

    // 250 + 300 inside June, 400 outside it
    sales
        .record_sale(
            user_id,
            common::sale_on(
                vec![common::line(widget.id, 25, 10.0)],
                250.0,
                common::noon(common::day(2025, 6, 5)),
            ),
        )
        .unwrap();
    sales
        .record_sale(
            user_id,
            common::sale_on(
                vec![common::line(widget.id, 30, 10.0)],
                300.0,
                common::noon(common::day(2025, 6, 20)),
            ),
        )
        .unwrap();
    sales
        .record_sale(
            user_id,
            common::sale_on(
                vec![common::line(widget.id, 40, 10.0)],
                400.0,
                common::noon(common::day(2025, 7, 2)),
            ),
        )
        .unwrap();

    let with_progress = goals.get_goals_with_progress(user_id).unwrap();
    assert_eq!(with_progress.len(), 1);

    let g = &with_progress[0];
    assert_eq!(g.current_revenue, 550.0);
    assert_eq!(g.current_quantity, 55);
    assert_eq!(g.revenue_percent(), Some(55.0));
    assert_eq!(g.display_percent(), Some(55.0));
}

#[test]
fn window_bounds_are_inclusive_whole_days() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let goals = GoalService::new(db.pool.clone());
    let sales = SaleService::new(db.pool.clone());
    let reports = ReportService::new(db.pool.clone());

    let widget = common::create_product(&db.pool, user_id, "Widget", None, 10.0, 100);
    let goal = goals
        .create_goal(user_id, revenue_goal("June push", 100.0, None))
        .unwrap();

    // late on the deadline day still counts
    sales
        .record_sale(
            user_id,
            common::sale_on(
                vec![common::line(widget.id, 1, 10.0)],
                10.0,
                common::day(2025, 6, 30).and_hms_opt(23, 30, 0).unwrap(),
            ),
        )
        .unwrap();

    let progress = reports.goal_progress(user_id, &goal).unwrap();
    assert_eq!(progress.current_revenue, 10.0);
    assert_eq!(progress.current_quantity, 1);
}

#[test]
fn product_scoped_goal_ignores_other_products() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let goals = GoalService::new(db.pool.clone());
    let sales = SaleService::new(db.pool.clone());

    let widget = common::create_product(&db.pool, user_id, "Widget", None, 10.0, 100);
    let gadget = common::create_product(&db.pool, user_id, "Gadget", None, 4.0, 100);

    goals
        .create_goal(user_id, revenue_goal("Widget only", 500.0, Some(widget.id)))
        .unwrap();

    sales
        .record_sale(
            user_id,
            common::sale_on(
                vec![common::line(widget.id, 10, 10.0)],
                100.0,
                common::noon(common::day(2025, 6, 10)),
            ),
        )
        .unwrap();
    sales
        .record_sale(
            user_id,
            common::sale_on(
                vec![common::line(gadget.id, 10, 4.0)],
                40.0,
                common::noon(common::day(2025, 6, 10)),
            ),
        )
        .unwrap();

    let with_progress = goals.get_goals_with_progress(user_id).unwrap();
    assert_eq!(with_progress[0].current_revenue, 100.0);
    assert_eq!(with_progress[0].current_quantity, 10);
}

#[test]
fn creating_a_goal_writes_an_audit_entry() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let goals = GoalService::new(db.pool.clone());
    let reports = ReportService::new(db.pool.clone());

    goals
        .create_goal(user_id, revenue_goal("June push", 1000.0, None))
        .unwrap();

    let recent = reports.recent_activity(user_id, None).unwrap();
    assert!(recent
        .iter()
        .any(|e| e.activity_type == "Goal" && e.description.contains("June push")));
}

#[test]
fn goals_list_by_nearest_deadline_and_delete_cleanly() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let goals = GoalService::new(db.pool.clone());

    let mut december = revenue_goal("December", 100.0, None);
    december.start_date = common::day(2025, 12, 1);
    december.deadline = common::day(2025, 12, 31);
    goals.create_goal(user_id, december).unwrap();

    let june = goals
        .create_goal(user_id, revenue_goal("June", 100.0, None))
        .unwrap();

    let listed = goals.get_goals(user_id).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].goal_name, "June");

    goals.delete_goal(user_id, june.id).unwrap();
    assert!(matches!(
        goals.get_goal(user_id, june.id),
        Err(GoalError::NotFound(_))
    ));
    assert!(matches!(
        goals.delete_goal(user_id, june.id),
        Err(GoalError::NotFound(_))
    ));
}

#[test]
fn invalid_goals_never_reach_storage() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let goals = GoalService::new(db.pool.clone());

    let mut no_target = revenue_goal("Empty", 100.0, None);
    no_target.target_revenue = None;
    assert!(matches!(
        goals.create_goal(user_id, no_target),
        Err(GoalError::InvalidData(_))
    ));

    let mut backwards = revenue_goal("Backwards", 100.0, None);
    backwards.deadline = common::day(2025, 5, 1);
    assert!(matches!(
        goals.create_goal(user_id, backwards),
        Err(GoalError::InvalidData(_))
    ));

    assert!(goals.get_goals(user_id).unwrap().is_empty());
}
