use super::element::{Element, ElementId, Pointer, Widget};

/// A pointer-up position the focus can land on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitTarget {
    pub element: ElementId,
    pub pointer: Pointer,
}

#[derive(Clone, Debug, Default)]
pub struct Layer {
    elements: Vec<Element>,
    rows: usize,
}

impl Layer {
    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Drop every element and restart row placement at the top.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.rows = 0;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn widget_mut(&mut self, id: ElementId) -> Option<&mut Widget> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.widget)
    }

    /// Claim the next row slot and return its index.
    pub fn next_row(&mut self) -> usize {
        let row = self.rows;
        self.rows += 1;
        row
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Hit targets of every interactive element, in insertion order.
    pub fn hit_targets(&self) -> Vec<HitTarget> {
        self.elements
            .iter()
            .flat_map(|e| {
                e.widget.hit_targets().into_iter().map(|pointer| HitTarget {
                    element: e.id,
                    pointer,
                })
            })
            .collect()
    }
}
