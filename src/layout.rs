use eframe::egui::{Pos2, Rect, Vec2, Vec2b, pos2, vec2};

/// Fallback for negative spacing, looked up on every layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutStyle {
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            horizontal_spacing: 6.0,
            vertical_spacing: 6.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutItem<K> {
    key: K,
    size_hint: Vec2,
    geometry: Rect,
}

impl<K: Copy> LayoutItem<K> {
    pub fn new(key: K, size_hint: Vec2) -> Self {
        Self {
            key,
            size_hint,
            geometry: Rect::NOTHING,
        }
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn size_hint(&self) -> Vec2 {
        self.size_hint
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }
}

#[derive(Clone, Debug)]
pub struct FlowLayout<K> {
    items: Vec<LayoutItem<K>>,
    margin: f32,
    h_space: f32,
    v_space: f32,
    style: LayoutStyle,
    geometry: Rect,
    content_height: f32,
}

impl<K: Copy + PartialEq> FlowLayout<K> {
    pub fn new(margin: f32, h_spacing: f32, v_spacing: f32) -> Self {
        Self {
            items: Vec::new(),
            margin: margin.max(0.0),
            h_space: h_spacing,
            v_space: v_spacing,
            style: LayoutStyle::default(),
            geometry: Rect::NOTHING,
            content_height: 0.0,
        }
    }

    pub fn add_item(&mut self, item: LayoutItem<K>) {
        self.items.push(item);
    }

    pub fn push(&mut self, key: K, size_hint: Vec2) {
        self.add_item(LayoutItem::new(key, size_hint));
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_at(&self, index: usize) -> Option<&LayoutItem<K>> {
        self.items.get(index)
    }

    pub fn take_at(&mut self, index: usize) -> Option<LayoutItem<K>> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn remove_item(&mut self, key: K) -> Option<LayoutItem<K>> {
        let index = self.items.iter().position(|item| item.key == key)?;
        self.take_at(index)
    }

    pub fn find(&self, key: K) -> Option<&LayoutItem<K>> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn items(&self) -> impl Iterator<Item = &LayoutItem<K>> {
        self.items.iter()
    }

    pub fn clear(&mut self) -> Vec<LayoutItem<K>> {
        std::mem::take(&mut self.items)
    }

    pub fn set_size_hint(&mut self, key: K, size_hint: Vec2) -> bool {
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.size_hint = size_hint;
                true
            }
            None => false,
        }
    }

    pub fn style(&self) -> LayoutStyle {
        self.style
    }

    pub fn set_style(&mut self, style: LayoutStyle) {
        self.style = style;
    }

    pub fn horizontal_spacing(&self) -> f32 {
        if self.h_space >= 0.0 {
            self.h_space
        } else {
            self.style.horizontal_spacing
        }
    }

    pub fn vertical_spacing(&self) -> f32 {
        if self.v_space >= 0.0 {
            self.v_space
        } else {
            self.style.vertical_spacing
        }
    }

    pub fn expanding_directions(&self) -> Vec2b {
        Vec2b::FALSE
    }

    pub fn has_height_for_width(&self) -> bool {
        true
    }

    pub fn height_for_width(&self, width: f32) -> f32 {
        self.do_layout(Rect::from_min_size(Pos2::ZERO, vec2(width, 0.0)), None)
    }

    pub fn minimum_size(&self) -> Vec2 {
        let largest = self
            .items
            .iter()
            .fold(Vec2::ZERO, |size, item| size.max(item.size_hint));
        largest + Vec2::splat(2.0 * self.margin)
    }

    pub fn size_hint(&self) -> Vec2 {
        self.minimum_size()
    }

    /// Places every item inside `rect` and returns the height consumed,
    /// margins included.
    pub fn set_geometry(&mut self, rect: Rect) -> f32 {
        let mut placements = Vec::with_capacity(self.items.len());
        let height = self.do_layout(rect, Some(&mut placements));

        for (item, placement) in self.items.iter_mut().zip(placements) {
            item.geometry = placement;
        }

        self.geometry = rect;
        self.content_height = height;
        height
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn key_at(&self, pos: Pos2) -> Option<K> {
        self.items
            .iter()
            .find(|item| item.geometry.contains(pos))
            .map(|item| item.key)
    }

    fn do_layout(&self, rect: Rect, mut placements: Option<&mut Vec<Rect>>) -> f32 {
        let left = rect.left() + self.margin;
        let top = rect.top() + self.margin;
        let right = rect.right() - self.margin;

        let space_x = self.horizontal_spacing();
        let space_y = self.vertical_spacing();

        let mut x = left;
        let mut y = top;
        let mut line_height = 0.0f32;

        for item in &self.items {
            let size = item.size_hint;
            let mut next_x = x + size.x + space_x;
            if next_x - space_x > right && line_height > 0.0 {
                x = left;
                y += line_height + space_y;
                next_x = x + size.x + space_x;
                line_height = 0.0;
            }

            if let Some(placements) = placements.as_deref_mut() {
                placements.push(Rect::from_min_size(pos2(x, y), size));
            }

            x = next_x;
            line_height = line_height.max(size.y);
        }

        y + line_height - rect.top() + self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with_widths(widths: &[f32], spacing: f32) -> FlowLayout<usize> {
        let mut layout = FlowLayout::new(0.0, spacing, 4.0);
        for (index, width) in widths.iter().enumerate() {
            layout.push(index, vec2(*width, 20.0));
        }
        layout
    }

    #[test]
    fn wraps_when_row_is_full() {
        let mut layout = layout_with_widths(&[50.0, 60.0, 70.0], 10.0);
        layout.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(140.0, 200.0)));

        let rows = layout
            .items()
            .map(|item| item.geometry().top())
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![0.0, 0.0, 24.0]);

        let second = layout.item_at(1).map(LayoutItem::geometry);
        assert_eq!(second.map(|rect| rect.left()), Some(60.0));
        assert_eq!(layout.content_height(), 44.0);
    }

    #[test]
    fn oversized_item_gets_its_own_row() {
        let mut layout = layout_with_widths(&[30.0, 500.0, 30.0], 5.0);
        layout.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0)));

        let tops = layout
            .items()
            .map(|item| item.geometry().top())
            .collect::<Vec<_>>();
        assert_eq!(tops, vec![0.0, 24.0, 48.0]);
        assert_eq!(layout.item_at(1).map(|item| item.geometry().left()), Some(0.0));
    }

    #[test]
    fn first_item_never_wraps() {
        let mut layout = layout_with_widths(&[500.0], 5.0);
        let height = layout.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0)));
        assert_eq!(height, 20.0);
        assert_eq!(layout.item_at(0).map(|item| item.geometry().top()), Some(0.0));
    }

    #[test]
    fn height_for_width_matches_layout_without_placing() {
        let mut layout = layout_with_widths(&[50.0, 60.0, 70.0], 10.0);
        assert_eq!(layout.height_for_width(140.0), 44.0);
        assert_eq!(layout.height_for_width(400.0), 20.0);
        assert!(layout.items().all(|item| item.geometry() == Rect::NOTHING));

        let placed = layout.set_geometry(Rect::from_min_size(pos2(30.0, 40.0), vec2(140.0, 10.0)));
        assert_eq!(placed, layout.height_for_width(140.0));
    }

    #[test]
    fn margins_offset_items_and_count_in_height() {
        let mut layout = FlowLayout::new(10.0, 5.0, 8.0);
        layout.push('a', vec2(40.0, 12.0));
        layout.push('b', vec2(40.0, 16.0));

        let height = layout.set_geometry(Rect::from_min_size(pos2(100.0, 100.0), vec2(80.0, 80.0)));

        let first = layout.item_at(0).map(LayoutItem::geometry);
        assert_eq!(first.map(|rect| rect.min), Some(pos2(110.0, 110.0)));
        // 40 + 5 + 40 overflows the 60px wide content area
        let second = layout.item_at(1).map(LayoutItem::geometry);
        assert_eq!(second.map(|rect| rect.min), Some(pos2(110.0, 130.0)));
        assert_eq!(height, 10.0 + 12.0 + 8.0 + 16.0 + 10.0);
        assert_eq!(layout.minimum_size(), vec2(60.0, 36.0));
        assert_eq!(layout.size_hint(), layout.minimum_size());
        assert!(layout.has_height_for_width());
        assert_eq!(layout.expanding_directions(), Vec2b::FALSE);
    }

    #[test]
    fn unspecified_spacing_follows_current_style() {
        let mut layout = FlowLayout::new(0.0, -1.0, -1.0);
        layout.push(0, vec2(10.0, 10.0));
        layout.push(1, vec2(10.0, 10.0));
        assert_eq!(layout.horizontal_spacing(), LayoutStyle::default().horizontal_spacing);

        layout.set_style(LayoutStyle {
            horizontal_spacing: 20.0,
            vertical_spacing: 3.0,
        });
        layout.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(200.0, 50.0)));
        assert_eq!(layout.item_at(1).map(|item| item.geometry().left()), Some(30.0));

        layout.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(25.0, 50.0)));
        assert_eq!(layout.item_at(1).map(|item| item.geometry().top()), Some(13.0));
    }

    #[test]
    fn take_and_remove_items() {
        let mut layout = layout_with_widths(&[10.0, 20.0, 30.0], 1.0);

        assert!(layout.take_at(7).is_none());
        assert_eq!(layout.take_at(0).map(|item| item.key()), Some(0));
        assert_eq!(layout.item_at(0).map(LayoutItem::key), Some(1));

        assert_eq!(layout.remove_item(2).map(|item| item.key()), Some(2));
        assert!(layout.remove_item(2).is_none());
        assert_eq!(layout.count(), 1);
    }

    #[test]
    fn hit_testing_uses_last_geometry() {
        let mut layout = layout_with_widths(&[50.0, 60.0], 10.0);
        assert_eq!(layout.key_at(pos2(5.0, 5.0)), None);

        layout.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(300.0, 100.0)));
        assert_eq!(layout.key_at(pos2(5.0, 5.0)), Some(0));
        assert_eq!(layout.key_at(pos2(70.0, 5.0)), Some(1));
        assert_eq!(layout.key_at(pos2(55.0, 5.0)), None);
    }
}
