use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_dry_run(name: &str, message: &str, would_push: bool, remote: &str) {
    println!("{} Dry run, nothing created:", style("→").yellow());
    println!("  tag:     {}", style(name).bold());
    println!("  message: {}", message);
    if would_push {
        println!("  push:    yes (to {})", remote);
    } else {
        println!("  push:    no");
    }
}
