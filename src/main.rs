use log::info;

use touchscene::node::surface;
use touchscene::{
    ControllerConfig, MarkerNode, NorthNode, PointInfo, Scene, SiteMapNode, TouchController,
    TouchNode,
};

fn dump(scene: &Scene) {
    for item in scene.draw_list() {
        let origin = item.transform.to_screen(0.0, 0.0);
        let (w, h) = item.surface.dimensions();
        info!(
            "  {:?} node {} {}x{} at ({:.1}, {:.1})",
            item.entity, item.id, w, h, origin.x, origin.y
        );
    }
}

pub fn main() -> Result<(), touchscene::Error> {
    env_logger::init();

    let mut scene = Scene::new();

    let mut map = SiteMapNode::blank(scene.ids(), 640, 480);
    map.set_relative_position(320.0, 240.0);
    let map = scene.spawn(map)?;

    let mut access_point = MarkerNode::new(scene.ids(), map, surface::rgba(0, 120, 255, 255));
    access_point.set_relative_position(-200.0, -100.0);
    scene.spawn(access_point)?;

    let mut user = MarkerNode::new(scene.ids(), map, surface::rgba(0, 200, 0, 255));
    user.set_relative_position(40.0, 60.0);
    let user = scene.spawn(user)?;

    let mut north = NorthNode::on(scene.ids(), map, 24, 64);
    north.set_relative_position(280.0, -200.0);
    let north = scene.spawn(north)?;

    scene.update();
    info!("initial overlay:");
    dump(&scene);

    let mut touch = TouchController::new(ControllerConfig::default().with_scale_limits(0.25, 4.0));

    // Pan the map.
    let samples = vec![
        PointInfo::down(100.0, 100.0),
        PointInfo::moved(&[(130.0, 120.0)]),
        PointInfo::up(130.0, 120.0),
    ];
    for p in &samples {
        info!("{:?} -> {:?}", p.action(), touch.handle(&mut scene, p));
    }

    // Pinch and twist it.
    let samples = vec![
        PointInfo::down(200.0, 200.0),
        PointInfo::moved(&[(150.0, 200.0), (250.0, 200.0)]),
        PointInfo::moved(&[(120.0, 180.0), (280.0, 220.0)]),
        PointInfo::up(280.0, 220.0),
    ];
    for p in &samples {
        info!("{:?} -> {:?}", p.action(), touch.handle(&mut scene, p));
    }

    // Move the user marker.
    let at = scene.global_transform(user)?.to_screen(12.0, 12.0);
    let samples = vec![
        PointInfo::down(at.x, at.y),
        PointInfo::moved(&[(at.x + 25.0, at.y - 10.0)]),
        PointInfo::up(at.x + 25.0, at.y - 10.0),
    ];
    for p in &samples {
        info!("{:?} -> {:?}", p.action(), touch.handle(&mut scene, p));
    }

    // Heading update from the compass.
    scene.with_node_mut(north, |n| n.set_angle(-35.0))?;
    scene.update();

    info!("final overlay:");
    dump(&scene);
    Ok(())
}
