use anyhow::Result;

use recycler_core::{AppConfig, LayoutConfig};

pub fn run(config: &AppConfig, count: usize, viewport: Option<f32>) -> Result<()> {
    let mut layout = LayoutConfig::from_settings(&config.layout)?;
    if let Some(viewport) = viewport {
        layout = layout.with_viewport(viewport)?;
    }
    let m = layout.metrics(count);

    println!(
        "Layout: viewport {} | item {} | spacing {}\n",
        layout.viewport_height(),
        layout.item_height(),
        layout.spacing()
    );
    println!("  items            {}", count);
    println!("  unit size        {}", m.unit_size);
    println!("  start offset     {}", m.start_y);
    println!("  end offset       {}", m.end_y);
    println!("  bottom offset    {}", m.end_pos_y);
    println!("  visible slots    {}", m.visible_slots);
    println!("  max top index    {}", m.max_reach_index);
    println!("  pool size        {}", m.pool_size);

    if layout.fits(count) {
        println!("\nAll items fit; scrolling is disabled.");
    }

    Ok(())
}
